//! Boss encounters
//!
//! inactive → entering → engaged → exiting → inactive. The boss slides in
//! from the right, bobs on a sine wave while the survive countdown runs,
//! then retreats to the right and is removed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Bounds;
use super::state::GameEvent;
use super::world::Viewport;

/// Ticks the player must survive (8s)
pub const BOSS_SURVIVE_TICKS: u32 = 480;
/// Points awarded when the countdown runs out
pub const BOSS_BONUS: u64 = 200;
/// Boss strobes during the last second
pub const BOSS_FLASH_TICKS: u32 = 60;

const ENTRY_SPEED_FACTOR: f32 = 1.5;
const EXIT_SPEED_FACTOR: f32 = 3.0;
/// Resting distance between the boss's right edge and the surface edge
const REST_MARGIN: f32 = 60.0;

/// Boss types, alternating each encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossKind {
    GiantCactus,
    MegaPterodactyl,
}

impl BossKind {
    pub fn size(&self) -> (f32, f32) {
        match self {
            BossKind::GiantCactus => (90.0, 110.0),
            BossKind::MegaPterodactyl => (120.0, 80.0),
        }
    }

    /// Vertical bob frequency (radians per tick)
    pub fn bob_frequency(&self) -> f32 {
        match self {
            BossKind::GiantCactus => 0.025,
            BossKind::MegaPterodactyl => 0.04,
        }
    }

    pub fn other(&self) -> Self {
        match self {
            BossKind::GiantCactus => BossKind::MegaPterodactyl,
            BossKind::MegaPterodactyl => BossKind::GiantCactus,
        }
    }
}

/// Encounter phase of a live boss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    Entering,
    Engaged,
    /// Countdown finished; sliding off to the right
    Exiting,
}

/// Time-remaining bar color band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerBand {
    Plenty,
    Half,
    Low,
}

/// A live boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub kind: BossKind,
    pub pos: Vec2,
    pub w: f32,
    pub h: f32,
    pub phase: BossPhase,
    /// Ticks since the encounter started
    pub frame: u32,
    pub ticks_remaining: u32,
}

impl Boss {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.pos.x, self.pos.y, self.w, self.h)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.w / 2.0, self.pos.y + self.h / 2.0)
    }

    /// Remaining fraction of the survive countdown
    pub fn progress(&self) -> f32 {
        self.ticks_remaining as f32 / BOSS_SURVIVE_TICKS as f32
    }

    pub fn timer_band(&self) -> TimerBand {
        let p = self.progress();
        if p > 0.5 {
            TimerBand::Plenty
        } else if p > 0.25 {
            TimerBand::Half
        } else {
            TimerBand::Low
        }
    }

    /// True on the "off" half of the strobe during the final second
    pub fn flashing(&self) -> bool {
        self.phase == BossPhase::Engaged
            && self.ticks_remaining < BOSS_FLASH_TICKS
            && (self.frame / 5) % 2 == 0
    }
}

/// Runs at most one boss at a time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossController {
    pub boss: Option<Boss>,
    next_kind: BossKind,
}

impl Default for BossController {
    fn default() -> Self {
        Self {
            boss: None,
            next_kind: BossKind::GiantCactus,
        }
    }
}

impl BossController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.boss.is_some()
    }

    /// Kind the next `start` will use
    pub fn next_kind(&self) -> BossKind {
        self.next_kind
    }

    /// Begin an encounter just off the right edge
    pub fn start(&mut self, viewport: &Viewport, events: &mut Vec<GameEvent>) {
        let kind = self.next_kind;
        self.next_kind = kind.other();
        let (w, h) = kind.size();
        self.boss = Some(Boss {
            kind,
            pos: Vec2::new(viewport.width + 10.0, viewport.ground_y() - h),
            w,
            h,
            phase: BossPhase::Entering,
            frame: 0,
            ticks_remaining: BOSS_SURVIVE_TICKS,
        });
        log::info!("Boss incoming: {:?}", kind);
        events.push(GameEvent::BossArrived(kind));
    }

    /// Advance one tick at world speed `speed`
    pub fn update(&mut self, speed: f32, viewport: &Viewport, events: &mut Vec<GameEvent>) {
        let Some(boss) = &mut self.boss else { return };
        boss.frame = boss.frame.wrapping_add(1);

        match boss.phase {
            BossPhase::Entering => {
                boss.pos.x -= speed * ENTRY_SPEED_FACTOR;
                let target_x = viewport.width - boss.w - REST_MARGIN;
                if boss.pos.x <= target_x {
                    boss.pos.x = target_x;
                    boss.phase = BossPhase::Engaged;
                }
            }
            BossPhase::Exiting => {
                boss.pos.x += speed * EXIT_SPEED_FACTOR;
                if boss.pos.x > viewport.width + 20.0 {
                    self.boss = None;
                }
            }
            BossPhase::Engaged => {
                let amplitude = viewport.height * 0.2;
                let center_y = viewport.ground_y() - boss.h - amplitude * 0.5;
                boss.pos.y =
                    center_y + amplitude * (boss.frame as f32 * boss.kind.bob_frequency()).sin();

                boss.ticks_remaining = boss.ticks_remaining.saturating_sub(1);
                if boss.ticks_remaining == 0 {
                    boss.phase = BossPhase::Exiting;
                    log::info!("Boss survived: {:?}", boss.kind);
                    events.push(GameEvent::BossDefeated {
                        kind: boss.kind,
                        bonus: BOSS_BONUS,
                        center: boss.center(),
                    });
                }
            }
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.boss.as_ref().map(Boss::bounds)
    }

    /// Clear any boss; the next encounter starts with the giant cactus
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
