use keyframer::cli::{Args, Command, log_level};
use keyframer::core::events::TimelineEventSender;
use keyframer::core::timeline::{KeyFrame, Timeline};
use keyframer::entities::{RigPose, RigScene, Scene};

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use std::fs;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(log_level(args.verbosity))
        .init();

    match args.command {
        Command::Info { script } => info_cmd(&script),
        Command::Bake {
            script,
            output,
            steps,
        } => bake_cmd(&script, &output, steps),
        Command::Roundtrip { script, output } => {
            let out = output.as_deref().unwrap_or(&script);
            roundtrip_cmd(&script, out)
        }
    }
}

/// Build a headless scene sized to the script's rig.
fn scene_for(timeline: &Timeline<RigPose>) -> RigScene {
    let nodes = timeline.current_frame().map_or(0, |p| p.node_count());
    let mut scene = RigScene::new();
    for i in 0..nodes {
        scene.add_node(format!("node_{i}"));
    }
    scene
}

/// Load a script with an event channel attached; queued events are
/// drained to the debug log by the caller via the returned receiver.
fn load_script(
    script: &Path,
) -> anyhow::Result<(
    Timeline<RigPose>,
    crossbeam_channel::Receiver<keyframer::TimelineEvent>,
)> {
    let mut timeline = Timeline::load(script)
        .with_context(|| format!("loading script {}", script.display()))?;
    let (tx, rx) = crossbeam_channel::unbounded();
    timeline.set_event_sender(TimelineEventSender::new(tx));
    Ok((timeline, rx))
}

fn drain_events(rx: &crossbeam_channel::Receiver<keyframer::TimelineEvent>) {
    for event in rx.try_iter() {
        debug!("{event:?}");
    }
}

fn info_cmd(script: &Path) -> anyhow::Result<()> {
    let (timeline, _rx) = load_script(script)?;

    println!("script:     {}", script.display());
    println!("keyframes:  {}", timeline.len());
    println!(
        "rig nodes:  {}",
        timeline.current_frame().map_or(0, |p| p.node_count())
    );
    println!("animatable: {}", timeline.can_animate());
    Ok(())
}

fn bake_cmd(script: &Path, output: &Path, steps: u32) -> anyhow::Result<()> {
    anyhow::ensure!(steps > 0, "--steps must be at least 1");

    let (mut timeline, rx) = load_script(script)?;
    let mut scene = scene_for(&timeline);
    let mut lines: Vec<String> = Vec::new();

    timeline.go_to_beginning(&mut scene);
    if timeline.is_defined() {
        lines.push(scene.capture_pose().encode());

        // Spline in-betweens for every segment with full tangent
        // context, then the landing keyframe itself
        while timeline.can_animate() {
            for s in 1..steps {
                let alpha = s as f32 / steps as f32;
                timeline.interpolate(alpha, &mut scene)?;
                lines.push(scene.capture_pose().encode());
            }
            timeline.advance_current_frame(&mut scene);
            lines.push(scene.capture_pose().encode());
        }

        // Trailing keys past the animatable range, unblended
        while timeline.cursor().is_some_and(|i| i + 1 < timeline.len()) {
            timeline.advance_current_frame(&mut scene);
            lines.push(scene.capture_pose().encode());
        }
    }

    let mut text = lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    fs::write(output, text).with_context(|| format!("writing {}", output.display()))?;

    drain_events(&rx);
    info!(
        "baked {} poses from {} keyframes",
        lines.len(),
        timeline.len()
    );
    println!("{} -> {} ({} poses)", script.display(), output.display(), lines.len());
    Ok(())
}

fn roundtrip_cmd(script: &Path, output: &Path) -> anyhow::Result<()> {
    let (timeline, _rx) = load_script(script)?;
    timeline
        .save(output)
        .with_context(|| format!("saving script {}", output.display()))?;
    println!(
        "{} -> {} ({} keyframes)",
        script.display(),
        output.display(),
        timeline.len()
    );
    Ok(())
}
