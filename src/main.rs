use std::env;
use std::fs;
use std::mem::size_of;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use log::info;

use render_testbed::{
    print_final_state, FramePacket, InputState, Params, Scene, Testbed, Uniforms,
};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    let scene = match &options.source {
        SceneSource::Demo => Scene::demo(),
        SceneSource::Path(path) => {
            let xml = fs::read_to_string(path)
                .with_context(|| format!("failed to read scene {path}"))?;
            Scene::from_xml(&xml).context("failed to parse scene XML")?
        }
    };

    println!(
        "Loaded scene with {} objects ({} lights)",
        scene.objects.len(),
        scene.lights.len()
    );
    for object in &scene.objects {
        println!(" - {} ({})", object.name, object.object_type);
    }

    let input = Arc::new(InputState::new());
    let mut testbed = Testbed::new(scene, input);

    info!(
        "composing {} frame(s) at {}x{}",
        options.frames, options.width, options.height
    );
    let delta_time = 1.0 / 60.0;
    testbed.step(delta_time);
    let mut packet = testbed.frame(options.width, options.height);
    for _ in 1..options.frames {
        testbed.step(delta_time);
        packet = testbed.frame(options.width, options.height);
    }

    print_frame_summary(&packet, &testbed);
    print_final_state(testbed.data_model());
    Ok(())
}

fn print_frame_summary(packet: &FramePacket, testbed: &Testbed) {
    let camera = testbed.camera().position;
    println!(
        "Last frame: {} draw call(s), {} light(s), camera at ({:.2}, {:.2}, {:.2})",
        packet.draw_count(),
        packet.lights.len(),
        camera.x,
        camera.y,
        camera.z
    );
    let light_bytes = packet.lights.len() * size_of::<render_testbed::GpuLight>();
    println!(
        "Upload sizes: uniforms {} B, params {} B, lights {} B",
        size_of::<Uniforms>(),
        size_of::<Params>(),
        light_bytes
    );
    for draw in &packet.draws {
        let textured = if draw.base_color.is_some() {
            "textured"
        } else {
            "untextured"
        };
        println!(
            " - {} tiling={} {}",
            draw.name, draw.params.tiling, textured
        );
    }
}

enum SceneSource {
    Demo,
    Path(String),
}

struct CliOptions {
    source: SceneSource,
    frames: u32,
    width: u32,
    height: u32,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut scene: Option<String> = None;
        let mut demo = false;
        let mut options = Self {
            source: SceneSource::Demo,
            frames: 1,
            width: 1280,
            height: 720,
        };
        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--demo" => demo = true,
                "--frames" => {
                    let value = args.next().ok_or_else(|| anyhow!("--frames needs a count"))?;
                    options.frames = value
                        .parse()
                        .with_context(|| format!("invalid frame count {value}"))?;
                }
                "--size" => {
                    let value = args.next().ok_or_else(|| anyhow!("--size needs WxH"))?;
                    let (width, height) = value
                        .split_once('x')
                        .ok_or_else(|| anyhow!("--size expects WxH, got {value}"))?;
                    options.width = width
                        .parse()
                        .with_context(|| format!("invalid width {width}"))?;
                    options.height = height
                        .parse()
                        .with_context(|| format!("invalid height {height}"))?;
                }
                other if other.starts_with("--") => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Expected --demo, --frames or --size"
                    ));
                }
                path => {
                    if scene.replace(path.to_string()).is_some() {
                        return Err(anyhow!("more than one scene path given"));
                    }
                }
            }
        }
        options.source = match (scene, demo) {
            (Some(path), false) => SceneSource::Path(path),
            (None, true) => SceneSource::Demo,
            (Some(_), true) => {
                return Err(anyhow!("--demo cannot be combined with a scene path"));
            }
            (None, false) => {
                return Err(anyhow!(
                    "Usage: render-testbed <scene.xml> [--frames N] [--size WxH] (or --demo)"
                ));
            }
        };
        if options.frames == 0 {
            return Err(anyhow!("--frames must be at least 1"));
        }
        Ok(options)
    }
}
