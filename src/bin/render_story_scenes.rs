use std::fs;
use std::path::PathBuf;

use climate_story::data::DatasetSource;
use climate_story::render::SvgStoryView;
use climate_story::{StoryConfig, StoryEngine, telemetry};

const USAGE: &str = "usage: render_story_scenes --data <path|url> [--config <json>] --out <dir>";

#[derive(Debug)]
struct CliArgs {
    data: String,
    config: Option<PathBuf>,
    out: PathBuf,
}

fn main() {
    let _ = telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("failed to read config `{}`: {e}", path.display()))?;
            StoryConfig::from_json_str(&text).map_err(|e| e.to_string())?
        }
        None => StoryConfig::default(),
    };

    fs::create_dir_all(&args.out)
        .map_err(|e| format!("failed to create `{}`: {e}", args.out.display()))?;

    let source = DatasetSource::parse(&args.data);
    let mut engine = StoryEngine::start(SvgStoryView::new(), config, &source)
        .map_err(|e| e.to_string())?;

    for index in 1..=engine.total_scenes() {
        engine.render_scene(index).map_err(|e| e.to_string())?;
        engine.view_mut().settle();

        let svg = engine.view().to_svg_string().map_err(|e| e.to_string())?;
        let svg_path = args.out.join(format!("scene-{index}.svg"));
        fs::write(&svg_path, svg)
            .map_err(|e| format!("failed to write `{}`: {e}", svg_path.display()))?;

        let snapshot = engine
            .snapshot()
            .and_then(|snapshot| snapshot.to_json_contract_v1_pretty())
            .map_err(|e| e.to_string())?;
        let json_path = args.out.join(format!("scene-{index}.json"));
        fs::write(&json_path, snapshot)
            .map_err(|e| format!("failed to write `{}`: {e}", json_path.display()))?;

        println!("wrote {} and {}", svg_path.display(), json_path.display());
    }
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut data = None::<String>;
    let mut config = None::<PathBuf>;
    let mut out = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--data" => {
                data = Some(
                    args.next()
                        .ok_or_else(|| "missing value for --data".to_owned())?,
                );
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--out" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --out".to_owned())?;
                out = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    Ok(CliArgs {
        data: data.ok_or_else(|| format!("missing --data\n{USAGE}"))?,
        config,
        out: out.ok_or_else(|| format!("missing --out\n{USAGE}"))?,
    })
}
