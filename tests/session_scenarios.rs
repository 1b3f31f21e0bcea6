use std::time::{Duration, Instant};

use lockin::{
    color,
    font::FontStyle,
    viz::{
        binary::AFTERGLOW,
        defrag::{Block, BlockView},
        BinaryClock, Visualization, VizMode,
    },
    Session, TimerState,
};

const SEED: u64 = 42;

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

fn session(total: u64, mode: Option<VizMode>, start: Instant) -> Session {
    Session::initialize(secs(total), mode, FontStyle::Slim, SEED, start)
}

#[test]
fn fraction_never_decreases_while_running() {
    let start = Instant::now();
    let mut s = session(12, Some(VizMode::Bar), start);
    s.on_resize(80, 24, start);

    let mut last = s.timer().fraction(start);
    assert_eq!(last, 0.0);

    // Ticks arrive a little early or a little late, with redraws in between
    let mut now = start;
    for tick in 0..12u64 {
        for _ in 0..4 {
            now += Duration::from_millis(280);
            let f = s.timer().fraction(now);
            assert!(f >= last, "fraction went back at tick {}: {} < {}", tick, f, last);
            last = f;
        }
        let finished = s.on_second_tick(now);
        let f = s.timer().fraction(now);
        assert!(f >= last);
        last = f;
        assert_eq!(finished, tick == 11);
    }

    assert_eq!(s.timer().remaining(), Duration::ZERO);
    assert_eq!(s.timer().fraction(now), 1.0);
}

#[test]
fn rendering_twice_gives_the_same_frame() {
    let start = Instant::now();
    let modes = [
        None,
        Some(VizMode::Bar),
        Some(VizMode::Defrag),
        Some(VizMode::Binary),
        Some(VizMode::Bubble),
        Some(VizMode::Merge),
        Some(VizMode::Quick),
    ];
    for mode in modes {
        let mut s = session(90, mode, start)
            .with_task_name(Some("write report".to_string()))
            .with_blocked_apps(vec!["Slack".to_string()]);
        s.on_resize(100, 40, start);
        let now = start + secs(1);
        s.on_second_tick(now);

        let at = now + Duration::from_millis(420);
        assert_eq!(s.render_frame(at), s.render_frame(at), "mode {:?}", mode);
    }
}

#[test]
fn repeated_resize_keeps_generated_layouts() {
    let start = Instant::now();
    for mode in [VizMode::Defrag, VizMode::Bubble, VizMode::Merge, VizMode::Quick] {
        let mut s = session(60, Some(mode), start);
        s.on_resize(70, 30, start);
        let first = s.visualization().clone();

        s.on_resize(70, 30, start + secs(1));
        s.on_resize(70, 24, start + secs(2));
        assert_eq!(s.visualization(), &first, "mode {:?}", mode);

        s.on_resize(120, 30, start + secs(3));
        assert_ne!(s.visualization(), &first, "mode {:?}", mode);
    }
}

#[test]
fn every_sort_ends_fully_ascending() {
    let start = Instant::now();
    for mode in [VizMode::Bubble, VizMode::Merge, VizMode::Quick] {
        let mut s = session(60, Some(mode), start);
        s.on_resize(60, 30, start);

        let Visualization::Sort {
            player: Some(player),
            ..
        } = s.visualization()
        else {
            panic!("sort frames missing for {:?}", mode);
        };
        let frames = player.frames();
        let n = frames[0].len() as u32;
        let expected: Vec<u32> = (0..n).collect();
        assert_ne!(frames[0], expected, "mode {:?} started sorted", mode);
        assert_eq!(frames.last(), Some(&expected), "mode {:?}", mode);

        let mut again = session(60, Some(mode), start);
        again.on_resize(60, 30, start);
        assert_eq!(again.visualization(), s.visualization());
    }
}

#[test]
fn bar_fills_before_the_countdown_ends() {
    let start = Instant::now();
    let mut s = session(10, Some(VizMode::Bar), start);
    s.on_resize(40, 20, start);

    let mut now = start;
    for _ in 0..9 {
        now += secs(1);
        assert!(!s.on_second_tick(now));
    }
    assert_eq!(s.timer().remaining(), secs(1));
    assert_eq!(s.timer().fraction(now), 1.0);

    let screen = s.render_frame(now).to_plain_string();
    let bar = screen.lines().last().unwrap_or_default();
    assert_eq!(bar, format!("{} 100%", "█".repeat(36)));
}

#[test]
fn defrag_sweep_conserves_blocks() {
    let start = Instant::now();
    let mut s = session(5, Some(VizMode::Defrag), start);
    s.on_resize(50, 20, start);

    let Visualization::Defrag(Some(grid)) = s.visualization().clone() else {
        panic!("defrag layout missing");
    };
    let data = grid.original().iter().filter(|b| **b == Block::Data).count();

    let before = grid.views(s.timer().fraction(start));
    assert!(before.iter().all(|v| !v.is_processed()));
    assert_eq!(before.iter().filter(|v| **v == BlockView::Fragmented).count(), data);

    // 4.5s of 5s is the end of the scaled sweep
    let mut now = start;
    for _ in 0..4 {
        now += secs(1);
        s.on_second_tick(now);
    }
    let later = now + Duration::from_millis(500);
    assert_eq!(s.timer().fraction(later), 1.0);

    let after = grid.views(s.timer().fraction(later));
    assert!(after.iter().all(|v| v.is_processed()));
    assert_eq!(after.iter().filter(|v| v.is_data()).count(), data);
    for (view, block) in after.iter().zip(grid.original()) {
        assert_eq!(view.is_data(), *block == Block::Data);
    }
}

#[test]
fn binary_bit_fades_out_after_switching_off() {
    let start = Instant::now();
    let mut timer = TimerState::new(secs(61));
    let mut clock = BinaryClock::new();
    clock.refresh(&timer, start);

    // 01:01 -> 01:00 turns off the lowest bit of the last digit
    let flip = start + secs(1);
    timer.tick_second(flip);
    clock.refresh(&timer, flip);
    let bit = 3 * 4 + 3;

    let glowing = clock.bit_color(bit, false, color::NOMINAL, flip + Duration::from_millis(10));
    assert_ne!(glowing, color::DIM);

    let settled = clock.bit_color(bit, false, color::NOMINAL, flip + AFTERGLOW);
    assert_eq!(settled, color::DIM);
}
