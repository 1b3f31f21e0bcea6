//! Visualizations
//!
//! Each visualization turns the progress fraction (and, for some, the wall
//! clock) into a block of colored cells. [`Visualization`] holds the state of
//! the single active mode and dispatches ticks, resizes and rendering to it.

pub mod bar;
pub mod binary;
pub mod defrag;
pub mod sort;

use std::time::{Duration, Instant};

use clap::ValueEnum;
use rand::Rng;
use tracing::debug;

use crate::{color::Rgb, frame::Frame, state::TimerState};

// Re-export main types
pub use binary::BinaryClock;
pub use defrag::DefragGrid;
pub use sort::{SortAlgorithm, SortPlayer};

/// Period of the sub-second animation tick
pub const FAST_TICK: Duration = Duration::from_millis(100);

/// Narrowest grid, in cells, the defrag and sort modes will draw
pub const MIN_GRID_WIDTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum VizMode {
    /// Progress bar with a sweeping pulse
    Bar,
    /// Disk defragmenter
    Defrag,
    /// Binary-coded decimal clock
    Binary,
    /// Bubble sort trace
    Bubble,
    /// Merge sort trace
    Merge,
    /// Quicksort trace
    Quick,
}

/// How often the host needs to redraw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickCadence {
    /// Once per second is enough
    Slow,
    /// Redraw every [`FAST_TICK`]
    Fast,
}

/// Grid width in two-column cells for a terminal `term_width` columns wide
pub fn grid_width(term_width: u16) -> usize {
    let usable = (usize::from(term_width) * 6 / 10).max(10);
    (usable / 2).max(MIN_GRID_WIDTH)
}

/// Inputs shared by every visualization for one redraw
#[derive(Debug, Clone, Copy)]
pub struct VizContext {
    pub fraction: f64,
    pub base: Rgb,
    pub term_width: u16,
    pub now: Instant,
    /// Time since the session started, drives decorative motion
    pub phase: Duration,
}

/// State of the active visualization. Grid-backed variants stay `None` until
/// the terminal width is known.
#[derive(Debug, Clone, PartialEq)]
pub enum Visualization {
    None,
    Bar,
    Defrag(Option<DefragGrid>),
    Binary(BinaryClock),
    Sort {
        algorithm: SortAlgorithm,
        player: Option<SortPlayer>,
    },
}

impl Visualization {
    pub fn new(mode: Option<VizMode>) -> Self {
        match mode {
            None => Visualization::None,
            Some(VizMode::Bar) => Visualization::Bar,
            Some(VizMode::Defrag) => Visualization::Defrag(None),
            Some(VizMode::Binary) => Visualization::Binary(BinaryClock::new()),
            Some(VizMode::Bubble) => Self::sort(SortAlgorithm::Bubble),
            Some(VizMode::Merge) => Self::sort(SortAlgorithm::Merge),
            Some(VizMode::Quick) => Self::sort(SortAlgorithm::Quick),
        }
    }

    fn sort(algorithm: SortAlgorithm) -> Self {
        Visualization::Sort {
            algorithm,
            player: None,
        }
    }

    pub fn cadence(&self) -> TickCadence {
        match self {
            Visualization::None => TickCadence::Slow,
            _ => TickCadence::Fast,
        }
    }

    /// Regenerate grid-backed state if the derived grid width changed.
    /// Returns whether anything was regenerated.
    pub fn resize<R: Rng + ?Sized>(&mut self, term_width: u16, rng: &mut R) -> bool {
        let width = grid_width(term_width);
        match self {
            Visualization::Defrag(grid) => {
                if grid.as_ref().is_some_and(|g| g.width() == width) {
                    return false;
                }
                debug!("Generating defrag layout {} cells wide", width);
                *grid = Some(DefragGrid::generate(width, rng));
                true
            }
            Visualization::Sort { algorithm, player } => {
                if player.as_ref().is_some_and(|p| p.width() == width) {
                    return false;
                }
                let generated = SortPlayer::generate(width, *algorithm, rng);
                debug!(
                    "Recorded {:?} sort {} cells wide, {} frames kept",
                    algorithm,
                    width,
                    generated.frames().len()
                );
                *player = Some(generated);
                true
            }
            Visualization::None | Visualization::Bar | Visualization::Binary(_) => false,
        }
    }

    /// Update time-dependent per-cell state
    pub fn refresh(&mut self, timer: &TimerState, now: Instant) {
        if let Visualization::Binary(clock) = self {
            clock.refresh(timer, now);
        }
    }

    pub fn render(&self, timer: &TimerState, ctx: &VizContext) -> Frame {
        match self {
            Visualization::None => Frame::new(),
            Visualization::Bar => bar::render(ctx.fraction, ctx.term_width, ctx.base, ctx.phase),
            Visualization::Defrag(grid) => grid
                .as_ref()
                .map_or_else(Frame::new, |g| g.render(ctx.fraction)),
            Visualization::Binary(clock) => clock.render(timer, ctx.base, ctx.now),
            Visualization::Sort { player, .. } => player
                .as_ref()
                .map_or_else(Frame::new, |p| p.render(ctx.fraction)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn grid_width_has_a_floor() {
        assert_eq!(grid_width(0), MIN_GRID_WIDTH);
        assert_eq!(grid_width(100), 30);
        assert_eq!(grid_width(200), 60);
    }

    #[test]
    fn cadence_by_mode() {
        assert_eq!(Visualization::new(None).cadence(), TickCadence::Slow);
        assert_eq!(
            Visualization::new(Some(VizMode::Bar)).cadence(),
            TickCadence::Fast
        );
    }

    #[test]
    fn resize_regenerates_only_on_width_change() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut viz = Visualization::new(Some(VizMode::Defrag));
        assert!(viz.resize(80, &mut rng));
        let Visualization::Defrag(Some(first)) = viz.clone() else {
            panic!("grid not generated");
        };
        assert!(!viz.resize(80, &mut rng));
        // 81 columns derive the same grid width as 80
        assert!(!viz.resize(81, &mut rng));
        let Visualization::Defrag(Some(second)) = viz.clone() else {
            panic!("grid dropped");
        };
        assert_eq!(first, second);
        assert!(viz.resize(120, &mut rng));
    }

    #[test]
    fn sort_modes_share_player() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut viz = Visualization::new(Some(VizMode::Quick));
        assert!(viz.resize(40, &mut rng));
        assert!(!viz.resize(40, &mut rng));
        match viz {
            Visualization::Sort { algorithm, player } => {
                assert_eq!(algorithm, SortAlgorithm::Quick);
                assert_eq!(player.map(|p| p.width()), Some(12));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn grids_render_empty_before_first_resize() {
        let timer = TimerState::new(Duration::from_secs(10));
        let ctx = VizContext {
            fraction: 0.5,
            base: crate::color::NOMINAL,
            term_width: 80,
            now: Instant::now(),
            phase: Duration::ZERO,
        };
        assert!(Visualization::new(Some(VizMode::Defrag))
            .render(&timer, &ctx)
            .is_empty());
        assert!(Visualization::new(Some(VizMode::Merge))
            .render(&timer, &ctx)
            .is_empty());
    }
}
