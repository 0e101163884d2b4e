//! Edit scripts: a JSON list of editor operations replayed on a simulated clock.

use crate::error::{CliError, CliResult};
use kurbo::Vec2;
use scenekit_core::{ComponentProperty, ResizeHandle, SceneComponent, SceneEditor, SceneResult};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Simulated time between consecutive steps and between gesture ticks.
pub const STEP_INTERVAL: Duration = Duration::from_millis(16);

/// A component reference: its index in the scene or its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Target {
    Index(usize),
    Id(String),
}

/// One scripted operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Select {
        component: Target,
    },
    Deselect,
    Update {
        property: ComponentProperty,
    },
    /// Drag the selection through cumulative deltas. No moves means the gesture is cancelled.
    Drag {
        #[serde(default)]
        moves: Vec<(f64, f64)>,
    },
    Resize {
        handle: ResizeHandle,
        #[serde(default)]
        moves: Vec<(f64, f64)>,
    },
    Wait {
        ms: u64,
    },
    Insert {
        component: SceneComponent,
    },
    Remove {
        component: Target,
    },
}

pub fn parse(json: &str) -> CliResult<Vec<Step>> {
    Ok(serde_json::from_str(json)?)
}

/// Drives a [`SceneEditor`] through a script against one scene.
pub struct Replay {
    editor: SceneEditor,
    scene_id: String,
    now: Instant,
    commits: usize,
}

impl Replay {
    pub fn new(editor: SceneEditor, scene_id: impl Into<String>, start: Instant) -> Self {
        Self {
            editor,
            scene_id: scene_id.into(),
            now: start,
            commits: 0,
        }
    }

    pub fn editor(&self) -> &SceneEditor {
        &self.editor
    }

    /// Number of commits that reached the scene store.
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Run every step, then let the quiet period elapse so pending edits land.
    pub fn run(&mut self, steps: &[Step]) -> CliResult<()> {
        for (index, step) in steps.iter().enumerate() {
            log::debug!("Step {index}: {step:?}");
            self.apply(index, step)?;
        }
        let quiet_period = self.editor.config().quiet_period();
        self.advance(quiet_period)
    }

    fn apply(&mut self, index: usize, step: &Step) -> CliResult<()> {
        let at = |source| CliError::Step { step: index, source };
        match step {
            Step::Select { component } => {
                let id = self.resolve(index, component)?;
                self.editor.select(&self.scene_id, &id).map_err(at)?;
            }
            Step::Deselect => self.editor.deselect(),
            Step::Update { property } => {
                self.editor.update_property(property.clone(), self.now).map_err(at)?;
            }
            Step::Drag { moves } => {
                self.editor.begin_drag();
                self.gesture(moves).map_err(at)?;
            }
            Step::Resize { handle, moves } => {
                self.editor.begin_resize(*handle);
                self.gesture(moves).map_err(at)?;
            }
            Step::Wait { ms } => return self.advance(Duration::from_millis(*ms)),
            Step::Insert { component } => {
                self.editor.insert_component(&self.scene_id, component.clone()).map_err(at)?;
            }
            Step::Remove { component } => {
                let id = self.resolve(index, component)?;
                self.editor.remove_component(&self.scene_id, &id).map_err(at)?;
            }
        }
        self.advance(STEP_INTERVAL)
    }

    fn gesture(&mut self, moves: &[(f64, f64)]) -> SceneResult<()> {
        if moves.is_empty() {
            self.editor.cancel_gesture();
            return Ok(());
        }
        for &(dx, dy) in moves {
            self.now += STEP_INTERVAL;
            self.editor.on_move(Vec2::new(dx, dy), self.now);
        }
        self.editor.end_gesture(self.now)?;
        Ok(())
    }

    fn advance(&mut self, by: Duration) -> CliResult<()> {
        self.now += by;
        if let Some(outcome) = self.editor.tick(self.now)? {
            self.commits += 1;
            log::info!("Commit {} into scene {}: {:?}", self.commits, self.scene_id, outcome);
        }
        Ok(())
    }

    fn resolve(&self, step: usize, target: &Target) -> CliResult<String> {
        match target {
            Target::Id(id) => Ok(id.clone()),
            Target::Index(index) => self
                .editor
                .store()
                .scene(&self.scene_id)
                .and_then(|scene| scene.components.get(*index))
                .map(|c| c.id().to_string())
                .ok_or(CliError::BadIndex { step, index: *index }),
        }
    }
}
