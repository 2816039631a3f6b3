//! Tuning constants shared by the integrator, the animation pacer and the
//! motion policies.
//!
//! Thresholds compared against the random source are strict lower bounds: a
//! draw must exceed the value for the event to fire.

/// Animation columns per walking cycle.
pub const FRAME_COUNT: u32 = 4;
/// Sprite sheet row groups per character, one per facing.
pub const FACINGS_PER_CHARACTER: u32 = 4;
/// Characters laid out on the bundled sprite sheet.
pub const CHARACTER_COUNT: u32 = 3;
/// Edge length of a cell on the bundled sprite sheet, in pixels.
pub const DEFAULT_CELL_SIZE: u32 = 16;
/// Sprite sheet bundled under `assets/`.
pub const DEFAULT_SPRITE_SHEET: &str = "ceviwalk16.png";
/// Viewport width assumed until a window reports its size.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 800.0;
/// Viewport height assumed until a window reports its size.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;
/// Nominal display refresh rate driving the simulation.
pub const DEFAULT_TICK_HZ: f64 = 60.0;

/// Base of the painter's-order key; the floored vertical position is added.
pub const Z_ORDER_BASE: i32 = 10_000;

/// Policies only evaluate most transitions on frames where
/// `frames & DECISION_MASK == 0`.
pub const DECISION_MASK: u32 = 0x0f;

/// Per-frame rotation rate used by every `turn` motion.
pub const TURN_ANGLE: f64 = 0.75;
/// Length of a fixed-duration `turn` motion.
pub const TURN_FRAMES: u32 = 120;
/// Gentle speed-up applied while accelerating.
pub const ACCEL_UP: f64 = 1.01;
/// Gentle slow-down applied while decelerating.
pub const ACCEL_DOWN: f64 = 0.99;
/// Neutral acceleration.
pub const ACCEL_NONE: f64 = 1.0;

/// Frames Sasara wanders before considering homing or turning.
pub const SASARA_RESTLESS_FRAMES: u32 = 400;
/// Chance threshold for Sasara to start homing or turning.
pub const SASARA_WANDER_CHANCE: f64 = 0.99;
/// Sasara caps its homing acceleration above this speed.
pub const HOMING_MAX_SPEED: f64 = 1.0;
/// Distance at which homing is considered satisfied.
pub const HOMING_SATISFIED_DISTANCE: f64 = 50.0;
/// Gain of the homing steering law.
pub const HOMING_STEER_GAIN: f64 = 3.0;
/// Spin retained when homing ends.
pub const HOMING_END_SPIN_DECAY: f64 = 0.6;
/// Homing-end walkers return to `default` below this speed.
pub const HOMING_END_SPEED: f64 = 0.5;

/// Sasara may start communicating while closer than this many cell widths.
pub const COMMUNICATE_MAX_CELLS: f64 = 4.0;
/// Communication needs the dyad aligned within this fraction of a cell on
/// either axis.
pub const COMMUNICATE_ALIGN_CELLS: f64 = 0.5;
/// Magnitude of the near-stationary facing vector used while communicating.
pub const COMMUNICATE_FACING_SPEED: f64 = 1e-4;
/// Chance threshold ending a communication.
pub const COMMUNICATE_RELEASE_CHANCE: f64 = 0.98;
/// Velocity multiplier applied when the dyad parts.
pub const COMMUNICATE_RELEASE_BOOST: f64 = 2500.0;
/// Draws above this threshold pick a rotate reaction, otherwise a step.
pub const COMMUNICATE_ROTATE_CHANCE: f64 = 0.9;
/// Frames a single communicate reaction lasts.
pub const REACTION_FRAMES: u32 = 16;
/// Spin applied on odd frames during a rotate reaction.
pub const REACTION_SPIN: f64 = 45.0;
/// Step reactions advance the animation when `frames & STEP_MASK == 0`.
pub const STEP_MASK: u32 = 0x03;
/// After parting, walkers stop accelerating above this speed.
pub const PARTING_CRUISE_SPEED: f64 = 0.5;
/// Frames after parting before the dyad may meet again.
pub const PARTING_FRAMES: u32 = 600;

/// Tsudumi decelerates above this speed.
pub const TSUDUMI_FAST_SPEED: f64 = 0.6;
/// Tsudumi accelerates below this speed.
pub const TSUDUMI_SLOW_SPEED: f64 = 0.5;
/// Chance threshold for Tsudumi and Tak to start a new motion.
pub const IDLE_CHANCE: f64 = 0.98;

/// Minimum frames Tak keeps turning.
pub const TAK_TURN_MIN_FRAMES: u32 = 60;
/// Chance threshold for Tak to stop turning.
pub const TAK_TURN_END_CHANCE: f64 = 0.97;
/// Minimum frames Tak keeps accelerating.
pub const TAK_ACCEL_MIN_FRAMES: u32 = 30;
/// Chance threshold for Tak to stop accelerating.
pub const TAK_ACCEL_END_CHANCE: f64 = 0.98;
/// Tak abandons acceleration above this speed.
pub const TAK_MAX_SPEED: f64 = 1.25;
/// Tak abandons deceleration below this speed.
pub const TAK_MIN_SPEED: f64 = 0.25;
