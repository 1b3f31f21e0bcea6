//! Sorting algorithm trace player
//!
//! A shuffled permutation is sorted once up front while every element write
//! is recorded. Playback maps the progress fraction onto the recorded history,
//! which is stride-sampled down to at most [`MAX_FRAMES`] snapshots.

use clap::ValueEnum;
use rand::{seq::SliceRandom, Rng};

use crate::{
    color,
    frame::{push_text, Frame, Row},
};

pub const ROWS: usize = 4;

/// Upper bound on the number of snapshots kept for playback
pub const MAX_FRAMES: usize = 2000;

/// Resting lightness of a cell that has not moved recently
const REST_LIGHTNESS: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum SortAlgorithm {
    Bubble,
    Merge,
    Quick,
}

impl SortAlgorithm {
    /// Frames a moved cell keeps glowing for
    pub fn glow_trail(self) -> usize {
        match self {
            SortAlgorithm::Quick => 4,
            SortAlgorithm::Bubble | SortAlgorithm::Merge => 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Swap(usize, usize),
    Write(usize, u32),
}

/// Array under sort plus the log of every write applied to it
struct Recorder {
    array: Vec<u32>,
    steps: Vec<Step>,
}

impl Recorder {
    fn swap(&mut self, i: usize, j: usize) {
        self.array.swap(i, j);
        self.steps.push(Step::Swap(i, j));
    }

    fn write(&mut self, k: usize, value: u32) {
        self.array[k] = value;
        self.steps.push(Step::Write(k, value));
    }
}

fn bubble(rec: &mut Recorder) {
    let n = rec.array.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - 1 - i {
            if rec.array[j] > rec.array[j + 1] {
                rec.swap(j, j + 1);
            }
        }
    }
}

/// Top-down merge sort over `lo..hi`
fn merge(rec: &mut Recorder, lo: usize, hi: usize) {
    if hi - lo <= 1 {
        return;
    }
    let mid = (lo + hi) / 2;
    merge(rec, lo, mid);
    merge(rec, mid, hi);

    let left = rec.array[lo..mid].to_vec();
    let right = rec.array[mid..hi].to_vec();
    let (mut i, mut j) = (0, 0);
    for k in lo..hi {
        let take_left = j >= right.len() || (i < left.len() && left[i] <= right[j]);
        if take_left {
            rec.write(k, left[i]);
            i += 1;
        } else {
            rec.write(k, right[j]);
            j += 1;
        }
    }
}

/// Lomuto quicksort over `lo..hi`, last element as pivot
fn quick(rec: &mut Recorder, lo: usize, hi: usize) {
    if hi.saturating_sub(lo) < 2 {
        return;
    }
    let last = hi - 1;
    let pivot = rec.array[last];
    let mut i = lo;
    for j in lo..last {
        if rec.array[j] < pivot {
            rec.swap(i, j);
            i += 1;
        }
    }
    rec.swap(i, last);
    quick(rec, lo, i);
    quick(rec, i + 1, hi);
}

/// Full history of a sort: the starting array and every write after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    initial: Vec<u32>,
    steps: Vec<Step>,
}

impl Trace {
    pub fn record(initial: Vec<u32>, algorithm: SortAlgorithm) -> Self {
        let mut rec = Recorder {
            array: initial.clone(),
            steps: Vec::new(),
        };
        let n = rec.array.len();
        match algorithm {
            SortAlgorithm::Bubble => bubble(&mut rec),
            SortAlgorithm::Merge => merge(&mut rec, 0, n),
            SortAlgorithm::Quick => quick(&mut rec, 0, n),
        }
        Self {
            initial,
            steps: rec.steps,
        }
    }

    /// Number of snapshots in the unsampled history, including the start
    pub fn frame_count(&self) -> usize {
        self.steps.len() + 1
    }

    /// Snapshots at evenly strided indices, at most `cap` of them. The first
    /// and last snapshots are always kept.
    pub fn frames(&self, cap: usize) -> Vec<Vec<u32>> {
        let count = self.frame_count();
        let indices: Vec<usize> = if count <= cap || cap < 2 {
            (0..count).collect()
        } else {
            (0..cap).map(|i| i * (count - 1) / (cap - 1)).collect()
        };

        let mut current = self.initial.clone();
        let mut applied = 0;
        let mut frames = Vec::with_capacity(indices.len());
        for target in indices {
            while applied < target {
                match self.steps[applied] {
                    Step::Swap(i, j) => current.swap(i, j),
                    Step::Write(k, v) => current[k] = v,
                }
                applied += 1;
            }
            frames.push(current.clone());
        }
        frames
    }
}

/// Precomputed playback for one grid width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortPlayer {
    width: usize,
    algorithm: SortAlgorithm,
    frames: Vec<Vec<u32>>,
}

impl SortPlayer {
    /// Shuffle `0..width * ROWS` and record its sort
    pub fn generate<R: Rng + ?Sized>(width: usize, algorithm: SortAlgorithm, rng: &mut R) -> Self {
        let total = (width * ROWS) as u32;
        let mut initial: Vec<u32> = (0..total).collect();
        initial.shuffle(rng);
        let trace = Trace::record(initial, algorithm);
        Self {
            width,
            algorithm,
            frames: trace.frames(MAX_FRAMES),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn frames(&self) -> &[Vec<u32>] {
        &self.frames
    }

    pub fn frame_index(&self, fraction: f64) -> usize {
        let last = self.frames.len().saturating_sub(1);
        ((fraction.max(0.0) * last as f64) as usize).min(last)
    }

    /// Glow level per cell at frame `idx`: 1.0 for a cell changed by this
    /// frame, fading by `1 / trail` per frame, 0.0 on the final frame
    pub fn glow(&self, idx: usize) -> Vec<f64> {
        let cells = self.frames.get(idx).map_or(0, Vec::len);
        let mut glow = vec![0.0; cells];
        if idx + 1 >= self.frames.len() {
            return glow;
        }

        let trail = self.algorithm.glow_trail();
        let oldest = (idx + 1).saturating_sub(trail).max(1);
        for (i, level) in glow.iter_mut().enumerate() {
            if let Some(j) = (oldest..=idx)
                .rev()
                .find(|&j| self.frames[j][i] != self.frames[j - 1][i])
            {
                *level = 1.0 - (idx - j) as f64 / trail as f64;
            }
        }
        glow
    }

    pub fn render(&self, fraction: f64) -> Frame {
        if self.frames.is_empty() {
            return Frame::new();
        }
        let idx = self.frame_index(fraction);
        let frame = &self.frames[idx];
        let total = frame.len();
        let glow = self.glow(idx);

        let rows = frame
            .chunks(self.width.max(1))
            .zip(glow.chunks(self.width.max(1)))
            .map(|(values, glows)| {
                let mut row = Row::with_capacity(values.len() * 2);
                for (&value, &g) in values.iter().zip(glows) {
                    // Snapped to three bands rather than a continuous fade
                    let lightness = if g > 0.66 {
                        0.7
                    } else if g > 0.33 {
                        0.5
                    } else {
                        REST_LIGHTNESS
                    };
                    push_text(&mut row, "██", color::rainbow(value as usize, total, lightness));
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

    const ALGORITHMS: [SortAlgorithm; 3] =
        [SortAlgorithm::Bubble, SortAlgorithm::Merge, SortAlgorithm::Quick];

    fn shuffled(n: u32, seed: u64) -> Vec<u32> {
        let mut v: Vec<u32> = (0..n).collect();
        v.shuffle(&mut StdRng::seed_from_u64(seed));
        v
    }

    #[test]
    fn every_algorithm_ends_sorted() {
        let input = shuffled(40, 11);
        let sorted: Vec<u32> = (0..40).collect();
        for algorithm in ALGORITHMS {
            let frames = Trace::record(input.clone(), algorithm).frames(usize::MAX);
            assert_eq!(frames.first(), Some(&input), "{algorithm:?}");
            assert_eq!(frames.last(), Some(&sorted), "{algorithm:?}");
        }
    }

    #[test]
    fn traces_are_deterministic() {
        let input = shuffled(64, 2);
        for algorithm in ALGORITHMS {
            assert_eq!(
                Trace::record(input.clone(), algorithm),
                Trace::record(input.clone(), algorithm)
            );
        }
    }

    #[test]
    fn bubble_records_one_frame_per_swap() {
        let trace = Trace::record(vec![2, 1, 0], SortAlgorithm::Bubble);
        let frames = trace.frames(usize::MAX);
        assert_eq!(frames, vec![vec![2, 1, 0], vec![1, 2, 0], vec![1, 0, 2], vec![0, 1, 2]]);
    }

    #[test]
    fn merge_records_every_write() {
        // 4 elements: two merges of 2 plus one merge of 4
        let trace = Trace::record(vec![3, 2, 1, 0], SortAlgorithm::Merge);
        assert_eq!(trace.frame_count(), 1 + 2 + 2 + 4);
    }

    #[test]
    fn sampling_keeps_endpoints() {
        let input = shuffled(120, 7);
        let trace = Trace::record(input.clone(), SortAlgorithm::Bubble);
        assert!(trace.frame_count() > MAX_FRAMES);
        let full = trace.frames(usize::MAX);
        let sampled = trace.frames(MAX_FRAMES);
        assert_eq!(sampled.len(), MAX_FRAMES);
        assert_eq!(sampled.first(), full.first());
        assert_eq!(sampled.last(), full.last());
        let stride_pick = 1000 * (full.len() - 1) / (MAX_FRAMES - 1);
        assert_eq!(sampled[1000], full[stride_pick]);
    }

    #[test]
    fn frame_index_is_clamped() {
        let player = SortPlayer::generate(10, SortAlgorithm::Quick, &mut StdRng::seed_from_u64(3));
        let last = player.frames().len() - 1;
        assert_eq!(player.frame_index(0.0), 0);
        assert_eq!(player.frame_index(1.0), last);
        assert_eq!(player.frame_index(1.5), last);
    }

    #[test]
    fn no_glow_on_final_frame() {
        let player = SortPlayer::generate(10, SortAlgorithm::Bubble, &mut StdRng::seed_from_u64(8));
        let last = player.frames().len() - 1;
        assert!(player.glow(last).iter().all(|g| *g == 0.0));
        assert!(player.glow(1).iter().any(|g| *g == 1.0));
        assert!(player.glow(0).iter().all(|g| *g == 0.0));
    }

    #[test]
    fn glow_fades_with_age() {
        let player = SortPlayer {
            width: 3,
            algorithm: SortAlgorithm::Quick,
            frames: vec![
                vec![2, 1, 0],
                vec![1, 2, 0],
                vec![1, 2, 0],
                vec![1, 2, 0],
                vec![0, 2, 1],
                vec![0, 1, 2],
            ],
        };
        let glow = player.glow(3);
        assert_eq!(glow, vec![0.5, 0.5, 0.0]);
        let frame = player.render(0.61);
        let cells = &frame.rows()[0];
        assert_eq!(cells[0].fg, Some(color::rainbow(1, 3, 0.5)));
        assert_eq!(cells[4].fg, Some(color::rainbow(0, 3, REST_LIGHTNESS)));
    }

    #[test]
    fn renders_grid() {
        let player = SortPlayer::generate(12, SortAlgorithm::Bubble, &mut StdRng::seed_from_u64(1));
        let frame = player.render(0.4);
        assert_eq!(frame.height(), ROWS);
        assert!(frame.rows().iter().all(|r| r.len() == 24));
    }
}
