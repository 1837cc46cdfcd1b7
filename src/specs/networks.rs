use serde::{Deserialize, Serialize};

use super::errors::SpecError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Activation {
    Relu,
    LeakyRelu,
    Elu,
    Selu,
    Sigmoid,
    Tanh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reduction {
    Max,
    Mean,
    Sum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Concat,
    Product,
    Stack,
    Sum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Normalization {
    Instance,
    Exponential,
}

impl Normalization {
    fn layer(self) -> Layer {
        match self {
            Normalization::Instance => Layer::InstanceNormalization,
            Normalization::Exponential => Layer::ExponentialNormalization,
        }
    }
}

/// One layer of a layered network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layer {
    Retrieve {
        tensors: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        aggregation: Option<Aggregation>,
    },
    Conv2d {
        size: u32,
        window: [u32; 2],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stride: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dilation: Option<u32>,
        activation: Activation,
        dropout: f32,
    },
    Dense {
        size: u32,
        activation: Activation,
        dropout: f32,
    },
    InstanceNormalization,
    ExponentialNormalization,
    Pool2d {
        reduction: Reduction,
    },
    Pooling {
        reduction: Reduction,
    },
    Register {
        tensor: String,
    },
}

impl Layer {
    pub fn retrieve(tensors: &[&str]) -> Self {
        Layer::Retrieve {
            tensors: tensors.iter().map(|t| t.to_string()).collect(),
            aggregation: None,
        }
    }

    pub fn register(tensor: &str) -> Self {
        Layer::Register {
            tensor: tensor.to_string(),
        }
    }

    pub fn dense(size: u32, activation: Activation, dropout: f32) -> Self {
        Layer::Dense {
            size,
            activation,
            dropout,
        }
    }
}

/// The library's automatically configured network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "auto")]
pub struct AutoNetwork {
    pub size: u32,
    pub depth: u32,
    pub final_size: Option<u32>,
    pub final_depth: u32,
    pub internal_rnn: bool,
}

impl Default for AutoNetwork {
    fn default() -> Self {
        Self {
            size: 64,
            depth: 2,
            final_size: None,
            final_depth: 1,
            internal_rnn: false,
        }
    }
}

fn open(layers: &mut Vec<Layer>, inputs: &[String]) {
    if !inputs.is_empty() {
        layers.push(Layer::Retrieve {
            tensors: inputs.to_vec(),
            aggregation: None,
        });
    }
}

fn close(layers: &mut Vec<Layer>, output: &Option<String>) {
    if let Some(tensor) = output {
        layers.push(Layer::Register {
            tensor: tensor.clone(),
        });
    }
}

/// Stack of `conv2d` layers whose filter count grows linearly with depth,
/// finished by a global mean pooling.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionalNetwork {
    pub inputs: Vec<String>,
    pub output: Option<String>,
    pub initial_filters: u32,
    pub kernel: [u32; 2],
    pub pool: Option<Reduction>,
    pub activation: Activation,
    pub stride: u32,
    pub dilation: u32,
    pub dropout: f32,
    pub layers: u32,
    pub normalization: Option<Normalization>,
}

impl Default for ConvolutionalNetwork {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: None,
            initial_filters: 32,
            kernel: [3, 3],
            pool: Some(Reduction::Max),
            activation: Activation::Relu,
            stride: 1,
            dilation: 1,
            dropout: 0.0,
            layers: 2,
            normalization: Some(Normalization::Instance),
        }
    }
}

impl ConvolutionalNetwork {
    /// Reads from `input` and registers its result as `output`.
    pub fn between(input: &str, output: &str) -> Self {
        Self {
            inputs: vec![input.to_string()],
            output: Some(output.to_string()),
            ..Self::default()
        }
    }

    pub fn build(&self) -> Vec<Layer> {
        let mut network = Vec::new();
        open(&mut network, &self.inputs);

        for i in 1..=self.layers {
            // strided and dilated convolutions are exclusive
            let (stride, dilation) = if self.stride > 1 {
                (Some(self.stride), None)
            } else {
                (None, Some(self.dilation))
            };
            network.push(Layer::Conv2d {
                size: self.initial_filters * i,
                window: self.kernel,
                stride,
                dilation,
                activation: self.activation,
                dropout: self.dropout,
            });

            if let Some(norm) = self.normalization {
                network.push(norm.layer());
            }
            if let Some(reduction) = self.pool {
                network.push(Layer::Pool2d { reduction });
            }
        }

        network.push(Layer::Pooling {
            reduction: Reduction::Mean,
        });
        close(&mut network, &self.output);
        network
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DenseNetwork {
    pub inputs: Vec<String>,
    pub output: Option<String>,
    pub units: u32,
    pub layers: u32,
    pub activation: Activation,
    pub dropout: f32,
    pub normalization: Option<Normalization>,
}

impl Default for DenseNetwork {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: None,
            units: 64,
            layers: 2,
            activation: Activation::Relu,
            dropout: 0.0,
            normalization: Some(Normalization::Instance),
        }
    }
}

impl DenseNetwork {
    pub fn between(input: &str, output: &str) -> Self {
        Self {
            inputs: vec![input.to_string()],
            output: Some(output.to_string()),
            ..Self::default()
        }
    }

    pub fn build(&self) -> Vec<Layer> {
        let mut network = Vec::new();
        open(&mut network, &self.inputs);

        for _ in 0..self.layers {
            network.push(Layer::dense(self.units, self.activation, self.dropout));
            if let Some(norm) = self.normalization {
                network.push(norm.layer());
            }
        }

        close(&mut network, &self.output);
        network
    }
}

/// Entry of a multi-input network: a whole branch or a single shared layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Block {
    Branch(Vec<Layer>),
    Layer(Layer),
}

/// Several input branches merged by a `retrieve` and followed by a dense head.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexNetwork {
    pub branches: Vec<Vec<Layer>>,
    pub layers: u32,
    pub units: u32,
    pub activation: Activation,
    pub dropout: f32,
    pub aggregation: Aggregation,
}

impl ComplexNetwork {
    pub fn new(branches: Vec<Vec<Layer>>) -> Self {
        Self {
            branches,
            layers: 2,
            units: 64,
            activation: Activation::Relu,
            dropout: 0.0,
            aggregation: Aggregation::Concat,
        }
    }

    pub fn build(&self) -> Result<Vec<Block>, SpecError> {
        if self.branches.is_empty() {
            return Err(SpecError::EmptyBranches);
        }

        let mut outputs = Vec::with_capacity(self.branches.len());
        for (branch, layers) in self.branches.iter().enumerate() {
            match layers.last() {
                Some(Layer::Register { tensor }) => outputs.push(tensor.clone()),
                _ => return Err(SpecError::MissingRegister { branch }),
            }
        }

        let mut network: Vec<Block> = self.branches.iter().cloned().map(Block::Branch).collect();
        network.push(Block::Layer(Layer::Retrieve {
            tensors: outputs,
            aggregation: Some(self.aggregation),
        }));
        for _ in 0..self.layers {
            network.push(Block::Layer(Layer::dense(
                self.units,
                self.activation,
                self.dropout,
            )));
        }
        Ok(network)
    }
}

/// [`ComplexNetwork`] over `branches` with the default dense head.
pub fn complex(branches: Vec<Vec<Layer>>) -> Result<Vec<Block>, SpecError> {
    ComplexNetwork::new(branches).build()
}

/// Any network the policy can be built on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Network {
    Auto(AutoNetwork),
    Layers(Vec<Layer>),
    Complex(Vec<Block>),
}
