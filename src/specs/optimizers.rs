use serde::{Deserialize, Serialize};

/// Optimizers and optimizer wrappers understood by the learning library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Optimizer {
    Adam {
        learning_rate: f32,
    },
    Synchronization {
        sync_frequency: u32,
        update_weight: f32,
    },
    ClippingStep {
        optimizer: Box<Optimizer>,
        threshold: f32,
        mode: ClippingMode,
    },
    Evolutionary {
        learning_rate: f32,
        num_samples: u32,
        unroll_loop: bool,
    },
    MultiStep {
        optimizer: Box<Optimizer>,
        num_steps: u32,
        unroll_loop: bool,
    },
    NaturalGradient {
        learning_rate: f32,
        cg_max_iterations: u32,
        cg_damping: f32,
        cg_unroll_loop: bool,
    },
    OptimizingStep {
        optimizer: Box<Optimizer>,
        ls_max_iterations: u32,
        ls_accept_ratio: f32,
        ls_mode: LineSearchMode,
        ls_parameter: f32,
        ls_unroll_loop: bool,
    },
    Plus {
        optimizer1: Box<Optimizer>,
        optimizer2: Box<Optimizer>,
    },
    SubsamplingStep {
        optimizer: Box<Optimizer>,
        fraction: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClippingMode {
    GlobalNorm,
    Norm,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineSearchMode {
    Exponential,
    Linear,
}

impl Optimizer {
    pub fn adam(learning_rate: f32) -> Self {
        Optimizer::Adam { learning_rate }
    }

    /// Target-network style optimizer used for critics.
    pub fn synchronization(sync_frequency: u32, update_weight: f32) -> Self {
        Optimizer::Synchronization {
            sync_frequency,
            update_weight,
        }
    }

    pub fn clipping_step(optimizer: Optimizer, threshold: f32) -> Self {
        Optimizer::ClippingStep {
            optimizer: Box::new(optimizer),
            threshold,
            mode: ClippingMode::GlobalNorm,
        }
    }

    pub fn evolutionary(learning_rate: f32) -> Self {
        Optimizer::Evolutionary {
            learning_rate,
            num_samples: 1,
            unroll_loop: false,
        }
    }

    pub fn multi_step(optimizer: Optimizer, num_steps: u32) -> Self {
        Optimizer::MultiStep {
            optimizer: Box::new(optimizer),
            num_steps,
            unroll_loop: false,
        }
    }

    pub fn natural_gradient(learning_rate: f32) -> Self {
        Optimizer::NaturalGradient {
            learning_rate,
            cg_max_iterations: 10,
            cg_damping: 1e-3,
            cg_unroll_loop: false,
        }
    }

    pub fn optimizing_step(optimizer: Optimizer) -> Self {
        Optimizer::OptimizingStep {
            optimizer: Box::new(optimizer),
            ls_max_iterations: 10,
            ls_accept_ratio: 0.9,
            ls_mode: LineSearchMode::Exponential,
            ls_parameter: 0.5,
            ls_unroll_loop: false,
        }
    }

    pub fn plus(optimizer1: Optimizer, optimizer2: Optimizer) -> Self {
        Optimizer::Plus {
            optimizer1: Box::new(optimizer1),
            optimizer2: Box::new(optimizer2),
        }
    }

    pub fn subsampling_step(optimizer: Optimizer, fraction: f32) -> Self {
        Optimizer::SubsamplingStep {
            optimizer: Box::new(optimizer),
            fraction,
        }
    }
}
