//! The built-in demo session and the fixed-step loop that plays it.

use glam::{Vec2, Vec3};
use stride_controller::{
    Character, ClimbState, ClimbStatus, ControlMode, ParkourObject, ParkourTag, SimWorld, motion,
};
use stride_input::{InputScript, RawInput, ScriptStep};
use tracing::info;

/// Something done to the simulated world (or the controller) at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldAction {
    /// Put a vault obstacle this many meters in front of the character.
    PlaceVaultAhead(f32),
    ClearParkour,
    /// A ledge grab: the climb solver reports hanging.
    StartClimb,
    /// The climb solver lets go.
    EndClimb,
    DisableController,
    EnableController,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldEvent {
    pub tick: u64,
    pub action: WorldAction,
}

impl WorldAction {
    fn apply(self, world: &SimWorld, character: &mut Character) {
        match self {
            WorldAction::PlaceVaultAhead(distance) => {
                let mut state = world.state_mut();
                let (forward, _) = motion::heading_axes(state.heading);
                let center = state.position + forward * distance;
                state
                    .parkour
                    .add(ParkourObject::tagged(ParkourTag::Vault, center, 0.5));
            }
            WorldAction::ClearParkour => world.state_mut().parkour.clear(),
            WorldAction::StartClimb => {
                world.state_mut().climb = ClimbStatus {
                    to_ledge: false,
                    on_ledge: true,
                    climb_state: ClimbState::Hanging,
                    active: true,
                };
            }
            WorldAction::EndClimb => world.state_mut().climb = ClimbStatus::default(),
            WorldAction::DisableController => character.controller_mut().disable_controller(),
            WorldAction::EnableController => character.controller_mut().enable_controller(),
        }
    }
}

/// Accumulates script steps and world events on one timeline.
#[derive(Debug, Default)]
struct ScenarioBuilder {
    steps: Vec<ScriptStep>,
    events: Vec<WorldEvent>,
    tick: u64,
}

impl ScenarioBuilder {
    fn hold(&mut self, ticks: u32, input: RawInput) -> &mut Self {
        self.steps.push(ScriptStep::hold(ticks, input));
        self.tick += u64::from(ticks);
        self
    }

    fn idle(&mut self, ticks: u32) -> &mut Self {
        self.hold(ticks, RawInput::default())
    }

    fn at_current_tick(&mut self, action: WorldAction) -> &mut Self {
        self.events.push(WorldEvent {
            tick: self.tick,
            action,
        });
        self
    }

    fn build(self) -> (InputScript, Vec<WorldEvent>) {
        (InputScript { steps: self.steps }, self.events)
    }
}

fn forward() -> RawInput {
    RawInput {
        movement: Vec2::Y,
        ..Default::default()
    }
}

/// The built-in session: walk, run and jump, zoom into first person and back,
/// pause, pass a vault obstacle, climb a ledge, and a scripted hand-off.
pub fn builtin() -> (InputScript, Vec<WorldEvent>) {
    let run = RawInput {
        run: true,
        ..forward()
    };
    let zoom_in = RawInput {
        scroll: 1.0,
        ..Default::default()
    };

    let mut b = ScenarioBuilder::default();
    b.idle(30).hold(60, forward()).hold(60, run);
    b.hold(1, RawInput { jump: true, ..run }).hold(40, run).idle(30);

    // Hold at minimum zoom past the transition delay, then scroll again.
    b.hold(1, zoom_in).idle(70).hold(1, zoom_in);
    b.hold(
        30,
        RawInput {
            mouse_x: 1.5,
            ..Default::default()
        },
    )
    .hold(30, forward());
    b.hold(
        1,
        RawInput {
            scroll: -1.0,
            ..Default::default()
        },
    )
    .idle(20);

    let pause = RawInput {
        pause: true,
        ..Default::default()
    };
    b.hold(1, pause).idle(30).hold(1, pause).idle(10);

    b.at_current_tick(WorldAction::PlaceVaultAhead(3.0)).hold(90, forward());
    b.at_current_tick(WorldAction::ClearParkour).idle(30);

    b.at_current_tick(WorldAction::StartClimb).hold(60, forward());
    b.at_current_tick(WorldAction::EndClimb).idle(30);

    b.at_current_tick(WorldAction::DisableController).hold(30, forward());
    b.at_current_tick(WorldAction::EnableController).idle(30);

    b.build()
}

/// What happened during a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunSummary {
    pub ticks: u64,
    /// Modes in the order they were first entered.
    pub modes_visited: Vec<ControlMode>,
    pub state_changes: u64,
    pub final_position: Vec3,
}

/// Play `ticks` fixed steps, applying world events as their tick comes up.
pub fn run(
    character: &mut Character,
    world: &SimWorld,
    events: &[WorldEvent],
    ticks: u64,
    dt: f32,
) -> RunSummary {
    let mut summary = RunSummary {
        modes_visited: vec![character.controller().mode()],
        ..Default::default()
    };

    for tick in 0..ticks {
        for event in events.iter().filter(|e| e.tick == tick) {
            info!(tick, action = ?event.action, "world event");
            event.action.apply(world, character);
        }

        if character.tick(dt) {
            summary.state_changes += 1;
            let state = character.state();
            info!(
                tick,
                mode = %character.controller().mode(),
                movement = ?state.movement().current(),
                action = ?state.action().current(),
                modifiers = ?state.modifiers().current(),
                "player state"
            );
        }

        let mode = character.controller().mode();
        if !summary.modes_visited.contains(&mode) {
            summary.modes_visited.push(mode);
        }

        world.step(dt);
        summary.ticks += 1;
    }

    summary.final_position = world.state().position;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_config::Config;
    use stride_input::ScriptedInput;

    #[test]
    fn test_builtin_session_visits_every_mode() {
        let (script, events) = builtin();
        let world = SimWorld::new();
        let mut character = Character::new(
            &Config::default(),
            world.collaborators(),
            ScriptedInput::from(&script),
        );

        let summary = run(&mut character, &world, &events, script.total_ticks(), 1.0 / 60.0);

        for mode in ControlMode::ALL {
            assert!(summary.modes_visited.contains(&mode), "never entered {mode}");
        }
        assert_eq!(summary.ticks, script.total_ticks());
        assert!(summary.state_changes > 0);
        assert_eq!(character.controller().mode(), ControlMode::Tpp);
        assert!(character.controller().allow_movement());
    }

    #[test]
    fn test_events_land_on_script_timeline() {
        let (script, events) = builtin();
        assert!(events.windows(2).all(|w| w[0].tick <= w[1].tick));
        assert!(events.iter().all(|e| e.tick < script.total_ticks()));
    }
}
