pub mod codes;
pub mod engine;
pub mod filters;
pub mod play;
pub mod solve;

mod error;
pub use error::Error;

/// dimensional analysis types
pub type Color = u8;
pub type Peg = usize;

// packed codeword parameters. counters occupy bytes
// [0, MAX_COLORS) and digits occupy bytes [MAX_COLORS, 16),
// so the two bounds must tile a 16-byte value exactly.
pub const MAX_PEGS: usize = 6;
pub const MAX_COLORS: usize = 10;
const _: () = assert!(MAX_PEGS + MAX_COLORS == 16);

/// sentinel for an unused peg position. never equals a legal color.
pub const UNSET: u8 = 0xFF;

/// tolerance for comparing floating-point heuristic scores
pub(crate) const SCORE_TOLERANCE: f64 = 1e-10;

/// initialize logging for the binaries
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();
}
