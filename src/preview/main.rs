use std::{cell::Cell, path::PathBuf, rc::Rc, time::Duration};

use clap::Parser;
use signanimation::{
    animation_loader::TimelineLoader, clock::FrameClock, sign_library::SignLibrary,
    AnimationTimeline, RigConfig, SignAnimationPlayer,
};

/// Step a sign animation and log what the avatar would do each frame
#[derive(Parser)]
struct Args {
    /// Timeline json produced by the translation service
    #[arg(long, conflicts_with = "signs")]
    timeline: Option<PathBuf>,

    /// Compose a timeline from these signs instead
    #[arg(long, num_args = 1..)]
    signs: Vec<String>,

    /// Sign clip library json, the built in clips are used otherwise
    #[arg(long)]
    library: Option<PathBuf>,

    /// Rig constants yaml
    #[arg(long)]
    rig: Option<PathBuf>,

    /// Write the timeline being played to this file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Sleep between frames and tick with measured wall clock deltas
    #[arg(long)]
    realtime: bool,
}

fn main() -> signanimation::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let timeline = match &args.timeline {
        Some(path) => TimelineLoader::new().get(path)?,
        None if args.signs.is_empty() => AnimationTimeline::fallback("hello").into(),
        None => {
            let library = match &args.library {
                Some(path) => SignLibrary::from_json_file(path)?,
                None => SignLibrary::default(),
            };

            library.compose(&args.signs).into()
        }
    };

    if let Some(path) = &args.export {
        timeline.write_json_file(path)?;
    }

    for sign in timeline.summary() {
        log::info!("{:>12} {:.1}s", sign.caption, sign.duration);
    }

    let rig = match &args.rig {
        Some(path) => RigConfig::from_yaml_file(path)?,
        None => RigConfig::default(),
    };

    let frame = timeline.frame_interval();

    // a couple of spare frames past the end, and none at all for an unbounded timeline
    let frame_budget = if timeline.total_duration.is_finite() {
        (timeline.total_duration.max(0.) / frame).ceil() as u64 + 2
    } else {
        log::warn!("timeline has no finite duration, nothing to preview");
        0
    };

    let finished = Rc::new(Cell::new(false));
    let mut player = SignAnimationPlayer::with_timeline(rig, timeline);

    let done = finished.clone();
    player.on_complete(move |run| {
        log::info!("finished {} signs in {}s", run.signs, run.total_duration);
        done.set(true);
    });

    player.play();

    let mut clock = FrameClock::new();
    let mut caption: Option<String> = None;

    let mut frames = 0;

    while !finished.get() && frames < frame_budget {
        frames += 1;

        let delta = if args.realtime {
            std::thread::sleep(Duration::from_secs_f32(frame));
            clock.delta()
        } else {
            frame
        };

        player.tick(delta);

        let active = player.active_sign().map(str::to_string);
        if active != caption {
            if let Some(sign) = &active {
                log::info!("{:6.2}s signing {sign}", player.current_time());
            }
            caption = active;
        }

        let pose = player.current_pose();
        log::debug!(
            "{:5.1}% right={:?} left={:?} torso_y={:.3}",
            player.progress_percent(),
            pose.right_hand.to_array(),
            pose.left_hand.to_array(),
            pose.rotations.torso_y
        );
    }

    Ok(())
}
