//! Scripted demo of the Swipedeck widget core.
//!
//! There is no renderer here; the demo plays the role of the host: it feeds
//! gesture events into the state machine, drives animation frames from wall
//! clock time, and logs what a render layer would paint.

use std::time::{Duration, Instant};

use swipedeck_core::{Runtime, RuntimeHandle};
use swipedeck_foundation::geometry::Size;
use swipedeck_ui::{SwiperConfig, SwiperState};

const FRAME: Duration = Duration::from_millis(16);

fn run_until_idle(handle: &RuntimeHandle, started: Instant) {
    while handle.has_frame_callbacks() {
        std::thread::sleep(FRAME);
        handle.drain_frame_callbacks(started.elapsed().as_nanos() as u64);
    }
}

fn dump_stack(swiper: &SwiperState<&'static str>) {
    if swiper.has_swiped_all() {
        log::info!("stack: <empty, all cards swiped>");
        return;
    }
    for entry in swiper.stack_entries() {
        log::info!(
            "stack depth {}: card {:?} (key {}) at +{:.1}px, scale {:.2}",
            entry.depth,
            swiper.card(entry.card_index),
            swiper.card_key(entry.card_index),
            entry.vertical_offset,
            entry.scale
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let started = Instant::now();
    let runtime = Runtime::default();
    let handle = runtime.handle();

    let mut config = SwiperConfig::new(Size::new(480.0, 800.0));
    config.stack_size = 3;
    let swiper = SwiperState::new(
        handle.clone(),
        vec!["Aurora", "Breeze", "Cinder", "Dune"],
        config,
    )
    .expect("demo deck is non-empty");

    swiper.configure_callbacks(|callbacks| {
        callbacks.on_swiped = Some(Box::new(|index, card| {
            log::info!("swiped away card {} ({:?})", index, card);
        }));
        callbacks.on_swiped_right = Some(Box::new(|_, card| {
            log::info!("  ...to the right: {:?}", card);
        }));
        callbacks.on_swiped_left = Some(Box::new(|_, card| {
            log::info!("  ...to the left: {:?}", card);
        }));
        callbacks.on_swipe_aborted = Some(Box::new(|| {
            log::info!("swipe aborted, card springs back");
        }));
        callbacks.on_tap_card = Some(Box::new(|index| {
            log::info!("tapped card {}", index);
        }));
        callbacks.on_swiped_all = Some(Box::new(|_| {
            log::info!("deck exhausted");
        }));
    });
    swiper.set_key_extractor(|card| card.to_lowercase());

    log::info!("--- initial stack ---");
    dump_stack(&swiper);

    log::info!("--- gesture: drag right past the threshold ---");
    swiper.grant();
    for _ in 0..10 {
        swiper.drag_by(15.0, 0.0);
    }
    log::info!(
        "live offset {:?}, overlay {:?}",
        swiper.card_offset(),
        swiper.overlay_direction()
    );
    swiper.release();
    run_until_idle(&handle, started);
    dump_stack(&swiper);

    log::info!("--- gesture: a timid drag that cancels ---");
    swiper.grant();
    swiper.drag_by(40.0, 0.0);
    swiper.release();
    run_until_idle(&handle, started);
    log::info!("active card is still {}", swiper.active_index());

    log::info!("--- programmatic: swipe the next card left ---");
    swiper.swipe_left(false).expect("finite vector");
    run_until_idle(&handle, started);
    dump_stack(&swiper);

    log::info!("--- rewind the last swipe ---");
    swiper.swipe_back_with(|index, card| {
        log::info!("welcome back, card {} ({:?})", index, card);
    });
    run_until_idle(&handle, started);
    dump_stack(&swiper);

    log::info!("--- a tap on the active card ---");
    swiper.grant();
    swiper.drag_by(1.0, 0.0);
    swiper.release();
    run_until_idle(&handle, started);

    swiper.unmount();
    log::info!("demo done");
}
