use serde::Serialize;
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

use crate::config::{ExperimentConfig, Thresholds};
use crate::control::{
    Actions, BaselineMapper, Control, ControlError, ControlMapper, DirectMapper, SignedMapper,
    SkillMapper,
};
use crate::features::TemporalBuffer;
use crate::reward::{
    ActorKind, CollisionTracker, DrivingState, Normalized, PretrainReward, RewardBreakdown,
    RewardFunction, RewardInput, RouteReward, WithActionPenalty,
};
use crate::skill::{CoordinationRules, Skill, SkillClassifier, SkillTable};

use super::errors::ExperimentError;
use super::variant::{SkillSource, Variant};

/// Result of one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub control: Control,
    pub skill: Skill,
    pub skill_name: &'static str,
    pub reward: RewardBreakdown,
    pub terminal: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeSummary {
    pub id: Uuid,
    pub variant: Variant,
    pub steps: u64,
    pub total_reward: f32,
    pub collision_penalty: f32,
    pub collisions: u32,
    pub terminal: bool,
}

#[derive(Debug, Clone)]
struct Episode {
    id: Uuid,
    steps: u64,
    total_reward: f32,
    terminal: bool,
}

impl Episode {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            steps: 0,
            total_reward: 0.0,
            terminal: false,
        }
    }
}

/// One experiment setting wired together: skill decoding, control mapping and
/// reward shaping, plus the per-episode state they need.
pub struct Experiment {
    config: ExperimentConfig,
    mapper: Box<dyn ControlMapper>,
    reward: Box<dyn RewardFunction>,
    classifier: SkillClassifier,
    collisions: CollisionTracker,
    control: Control,
    episode: Episode,
    past_actions: TemporalBuffer,
    past_skills: TemporalBuffer,
}

impl Experiment {
    pub fn new(config: ExperimentConfig) -> Result<Self, ExperimentError> {
        config.validate()?;

        let variant = config.variant;
        let mapper = build_mapper(variant, &config.thresholds);
        let reward = build_reward(&config);
        let horizon = config.time_horizon;

        info!(?variant, horizon, "experiment created");
        Ok(Self {
            mapper,
            reward,
            classifier: SkillClassifier::new(config.thresholds.skill_eps),
            collisions: CollisionTracker::new(config.collision.penalty),
            control: Control::default(),
            episode: Episode::new(),
            past_actions: TemporalBuffer::new(horizon, variant.action_len()),
            past_skills: TemporalBuffer::new(horizon, 1),
            config,
        })
    }

    pub fn for_variant(variant: Variant) -> Result<Self, ExperimentError> {
        Self::new(ExperimentConfig::new(variant))
    }

    pub fn from_json_str(json: &str) -> Result<Self, ExperimentError> {
        Self::new(ExperimentConfig::from_json_str(json)?)
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// Control applied on the last step.
    pub fn control(&self) -> &Control {
        &self.control
    }

    pub fn episode_id(&self) -> Uuid {
        self.episode.id
    }

    pub fn collision_penalty(&self) -> f32 {
        self.collisions.total()
    }

    pub fn past_actions(&self) -> &TemporalBuffer {
        &self.past_actions
    }

    pub fn past_skills(&self) -> &TemporalBuffer {
        &self.past_skills
    }

    pub fn classifier(&self) -> &SkillClassifier {
        &self.classifier
    }

    /// Records a collision; returns the penalty it added.
    pub fn on_collision(&mut self, kind: ActorKind) -> f32 {
        let _span = info_span!("episode", id = %self.episode.id).entered();
        self.collisions.record(kind)
    }

    pub fn on_collision_with(&mut self, type_id: &str) -> f32 {
        self.on_collision(ActorKind::from_type_id(type_id))
    }

    /// Starts a new episode and returns its id.
    pub fn reset(&mut self) -> Uuid {
        let previous = self.summary();
        self.episode = Episode::new();
        self.collisions.reset();
        self.control = Control::default();
        self.past_actions.reset();
        self.past_skills.reset();

        info!(
            previous = %previous.id,
            steps = previous.steps,
            total_reward = previous.total_reward,
            id = %self.episode.id,
            "episode reset"
        );
        self.episode.id
    }

    pub fn summary(&self) -> EpisodeSummary {
        EpisodeSummary {
            id: self.episode.id,
            variant: self.config.variant,
            steps: self.episode.steps,
            total_reward: self.episode.total_reward,
            collision_penalty: self.collisions.total(),
            collisions: self.collisions.count(),
            terminal: self.episode.terminal,
        }
    }

    /// Maps `actions` to a control and scores the resulting step.
    pub fn step(
        &mut self,
        actions: &Actions,
        state: &DrivingState,
    ) -> Result<StepOutcome, ExperimentError> {
        let _span = info_span!("episode", id = %self.episode.id, step = self.episode.steps)
            .entered();
        let variant = self.config.variant;
        let (control, skill) = self.map_actions(actions)?;

        let reward = self.reward.reward(&RewardInput {
            state,
            collision_penalty: self.collisions.total(),
            actions,
            skill,
        })?;
        if variant == Variant::Pretrain && reward.action_penalty != 0.0 {
            warn!(
                %skill,
                penalty = reward.action_penalty,
                "recorded control disagrees with its skill"
            );
        }

        let len = variant.action_len();
        self.past_actions.push(&actions.control[..len])?;
        self.past_skills.push(&[self.skill_index(skill) as f32])?;

        let terminal = self.collisions.should_terminate()
            || state.distance_to_destination < self.config.destination_threshold;

        self.control = control;
        self.episode.steps += 1;
        self.episode.total_reward += reward.total;
        self.episode.terminal = terminal;

        debug!(
            %skill,
            throttle = control.throttle,
            steer = control.steer,
            brake = control.brake,
            reverse = control.reverse,
            reward = reward.total,
            terminal,
            "step"
        );

        Ok(StepOutcome {
            control,
            skill,
            skill_name: skill.name(),
            reward,
            terminal,
        })
    }

    /// Decodes the step's skill and maps `actions` to a control without
    /// touching the episode.
    pub fn map_actions(&self, actions: &Actions) -> Result<(Control, Skill), ControlError> {
        let declared = self.decode_skill(actions)?;
        let control = self.mapper.map(actions, declared, &self.control)?;
        let skill = declared.unwrap_or_else(|| self.classifier.classify(&control));
        Ok((control, skill))
    }

    /// Scores `input` with this experiment's reward pipeline, outside of any
    /// episode bookkeeping.
    pub fn reward(&self, input: &RewardInput<'_>) -> Result<RewardBreakdown, ControlError> {
        self.reward.reward(input)
    }

    fn decode_skill(&self, actions: &Actions) -> Result<Option<Skill>, ControlError> {
        match self.config.variant.skill_source() {
            SkillSource::Classified => Ok(None),
            SkillSource::Bucketed(table) => {
                let first = actions.control.first().ok_or(ControlError::ActionLength {
                    expected: self.mapper.action_len(),
                    actual: 0,
                })?;
                Ok(Some(table.bucket(*first)))
            }
            SkillSource::Indexed(table) => {
                let value = actions.skill.ok_or(ControlError::MissingSkill)?;
                Ok(Some(table.from_rounded(value)?))
            }
        }
    }

    fn skill_index(&self, skill: Skill) -> usize {
        let table = match self.config.variant.skill_source() {
            SkillSource::Bucketed(table) | SkillSource::Indexed(table) => table,
            SkillSource::Classified => SkillTable::Complete,
        };
        table.index_of(skill).unwrap_or(0)
    }
}

fn build_mapper(variant: Variant, thresholds: &Thresholds) -> Box<dyn ControlMapper> {
    match variant {
        Variant::Baseline => Box::new(BaselineMapper {
            dead_zone: thresholds.steer_dead_zone,
            steer_magnitude: thresholds.steer_magnitude,
        }),
        Variant::RouteFollow => Box::new(SkillMapper {
            min_actuation: thresholds.min_actuation,
        }),
        Variant::ActionPenalty | Variant::CompleteState | Variant::Pretrain => {
            Box::new(SignedMapper::with_offset(variant.control_offset()))
        }
        Variant::Play => Box::new(DirectMapper),
    }
}

fn build_reward(config: &ExperimentConfig) -> Box<dyn RewardFunction> {
    let variant = config.variant;
    let rc = &config.reward;

    let mut reward: Box<dyn RewardFunction> = match variant {
        Variant::Pretrain => Box::new(PretrainReward::new(rc.clone())),
        _ => Box::new(RouteReward::new(rc.clone())),
    };
    if rc.normalize.unwrap_or(variant.normalizes()) {
        reward = Box::new(Normalized::new(reward, rc.normalization_multiple));
    }
    if rc.penalize_actions.unwrap_or(variant.penalizes_actions()) {
        reward = Box::new(WithActionPenalty::new(
            reward,
            CoordinationRules::new(config.thresholds.penalty_eps),
            rc.action_penalty_weight,
            variant.control_offset(),
        ));
    }
    reward
}
