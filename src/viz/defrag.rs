//! Disk defragmenter simulation
//!
//! A random layout of data and free blocks is generated once per grid width.
//! A cursor driven by the progress fraction sweeps the grid row by row;
//! blocks behind it are drawn in their defragmented look, blocks ahead of it
//! in their original fragmented look.

use rand::{seq::SliceRandom, Rng};

use crate::{
    color,
    frame::{push_text, Frame, Row},
};

pub const ROWS: usize = 8;
/// Share of blocks holding data, in percent
pub const DATA_PERCENT: usize = 65;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Data,
    Free,
}

/// How a block is drawn for a given cursor position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockView {
    /// Data the cursor has passed
    Consolidated,
    /// Free space the cursor has passed
    Reclaimed,
    /// Data not yet reached
    Fragmented,
    /// Free space not yet reached
    Free,
}

impl BlockView {
    pub fn is_processed(self) -> bool {
        matches!(self, BlockView::Consolidated | BlockView::Reclaimed)
    }

    pub fn is_data(self) -> bool {
        matches!(self, BlockView::Consolidated | BlockView::Fragmented)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefragGrid {
    width: usize,
    original: Vec<Block>,
}

impl DefragGrid {
    /// Random layout `width` blocks wide and [`ROWS`] tall
    pub fn generate<R: Rng + ?Sized>(width: usize, rng: &mut R) -> Self {
        let total = width * ROWS;
        let data = total * DATA_PERCENT / 100;
        let mut original: Vec<Block> = (0..total)
            .map(|i| if i < data { Block::Data } else { Block::Free })
            .collect();
        original.shuffle(rng);
        Self { width, original }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn original(&self) -> &[Block] {
        &self.original
    }

    /// Index of the first block not yet processed
    pub fn cursor(&self, fraction: f64) -> usize {
        let total = self.original.len();
        ((fraction.max(0.0) * total as f64) as usize).min(total)
    }

    pub fn views(&self, fraction: f64) -> Vec<BlockView> {
        let cursor = self.cursor(fraction);
        self.original
            .iter()
            .enumerate()
            .map(|(i, block)| match (i < cursor, block) {
                (true, Block::Data) => BlockView::Consolidated,
                (true, Block::Free) => BlockView::Reclaimed,
                (false, Block::Data) => BlockView::Fragmented,
                (false, Block::Free) => BlockView::Free,
            })
            .collect()
    }

    pub fn render(&self, fraction: f64) -> Frame {
        let views = self.views(fraction);
        let rows = views
            .chunks(self.width.max(1))
            .map(|chunk| {
                let mut row = Row::with_capacity(chunk.len() * 2);
                for view in chunk {
                    let (glyph, fg) = match view {
                        BlockView::Consolidated => ("██", color::DEFRAG_DATA),
                        BlockView::Fragmented => ("██", color::DEFRAG_FRAGMENT),
                        BlockView::Reclaimed => ("░░", color::DIM),
                        BlockView::Free => ("░░", color::DEFRAG_FREE),
                    };
                    push_text(&mut row, glyph, fg);
                }
                row
            })
            .collect();
        Frame::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn grid(width: usize, seed: u64) -> DefragGrid {
        DefragGrid::generate(width, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn layout_has_expected_mix() {
        let g = grid(20, 1);
        assert_eq!(g.original().len(), 160);
        let data = g.original().iter().filter(|b| **b == Block::Data).count();
        assert_eq!(data, 104);
    }

    #[test]
    fn same_seed_same_layout() {
        assert_eq!(grid(15, 9), grid(15, 9));
    }

    #[test]
    fn cursor_sweeps_whole_grid() {
        let g = grid(10, 3);
        assert!(g.views(0.0).iter().all(|v| !v.is_processed()));
        assert!(g.views(1.0).iter().all(|v| v.is_processed()));
        assert_eq!(g.cursor(1.0), 80);
        assert_eq!(g.cursor(0.5), 40);
    }

    #[test]
    fn categories_are_conserved() {
        let g = grid(12, 5);
        let data = g.original().iter().filter(|b| **b == Block::Data).count();
        for step in 0..=20 {
            let views = g.views(step as f64 / 20.0);
            assert_eq!(views.iter().filter(|v| v.is_data()).count(), data);
            for (view, block) in views.iter().zip(g.original()) {
                assert_eq!(view.is_data(), *block == Block::Data);
            }
        }
    }

    #[test]
    fn renders_two_columns_per_block() {
        let g = grid(10, 4);
        let frame = g.render(0.3);
        assert_eq!(frame.height(), ROWS);
        assert!(frame.rows().iter().all(|r| r.len() == 20));
    }
}
