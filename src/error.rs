use derive_more::{Display, Error, From};

/// Errors raised while setting up the poi.
///
/// The refresh loop itself never fails: out-of-range rows play as blank and
/// unknown selector codes fall back to the default animation.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// An embassy task could not be spawned (its pool is already in use).
    #[cfg(not(feature = "host"))]
    #[display("failed to spawn task: {_0:?}")]
    #[from]
    TaskSpawn(#[error(not(source))] embassy_executor::SpawnError),

    /// An animation was built from an empty row table.
    #[display("animation has no rows")]
    #[from(ignore)]
    EmptyAnimation,

    /// An animation is too tall for its mirrored length to fit the playback cursor.
    #[display("animation height {height} exceeds the playback cursor range")]
    #[from(ignore)]
    AnimationTooTall {
        /// Number of rows in the rejected table.
        height: usize,
    },

    /// A selector switch pin could not be read.
    #[display("selector switch pin could not be read")]
    #[from(ignore)]
    SelectorPin,
}

/// Result type for poi setup operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;
