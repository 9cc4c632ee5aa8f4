use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context};
use tracing::info;

use printlapse::{
    init_logging, GcodeImporter, ImportSettings, PathModel, PathStats, BUILD_DATE, VERSION,
};

/// JSON document written by `--json`: the full model plus the animation
/// path grouping selected by the split-layers setting.
#[derive(serde::Serialize)]
struct ModelExport<'a> {
    model: &'a PathModel,
    paths: Vec<Vec<[f64; 3]>>,
}

struct CliArgs {
    input: PathBuf,
    settings: ImportSettings,
    json_out: Option<PathBuf>,
    show_layers: bool,
}

fn usage() -> &'static str {
    "Usage: printlapse <file.gcode> [OPTIONS]\n\n\
     Options:\n\
       --subdivide <len>   Split segments longer than <len> mm\n\
       --json <out>        Write the imported path model as JSON\n\
       --continuous        Export one continuous path instead of per-layer paths\n\
       --layers            Print a per-layer breakdown\n\
       --version           Print version information\n\
       --help              Show this help"
}

fn parse_args() -> anyhow::Result<CliArgs> {
    let mut input = None;
    let mut settings = ImportSettings::default();
    let mut json_out = None;
    let mut show_layers = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => {
                println!("{}", usage());
                std::process::exit(0);
            }
            "--version" | "-V" => {
                println!("printlapse {VERSION} (built {BUILD_DATE})");
                std::process::exit(0);
            }
            "--subdivide" => {
                let value = args
                    .next()
                    .context("--subdivide requires a length in millimeters")?;
                let threshold: f64 = value
                    .parse()
                    .with_context(|| format!("invalid subdivision length '{value}'"))?;
                settings.subdivide = true;
                settings.max_segment_size = threshold;
            }
            "--json" => {
                let value = args.next().context("--json requires an output path")?;
                json_out = Some(PathBuf::from(value));
            }
            "--continuous" => settings.split_layers = false,
            "--layers" => show_layers = true,
            other if other.starts_with('-') => {
                bail!("unknown option '{other}'\n\n{}", usage());
            }
            other => {
                if input.replace(PathBuf::from(other)).is_some() {
                    bail!("only one input file may be given\n\n{}", usage());
                }
            }
        }
    }

    let input = input.with_context(|| format!("no input file given\n\n{}", usage()))?;
    settings.validate().context("invalid import settings")?;

    Ok(CliArgs {
        input,
        settings,
        json_out,
        show_layers,
    })
}

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let args = parse_args()?;

    let importer = GcodeImporter::new(args.settings.clone());
    let started = Instant::now();
    let model = importer
        .import_file(&args.input)
        .with_context(|| format!("failed to import {}", args.input.display()))?;
    info!(
        file = %args.input.display(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "import finished"
    );

    let stats = PathStats::compute(&model);
    println!("{stats}");

    if args.show_layers {
        println!();
        for layer in &model.layers {
            println!(
                "layer {:>4}  z {:>8.3}  segments {:>6}",
                layer.index,
                layer.z,
                layer.len()
            );
        }
    }

    if let Some(path) = args.json_out {
        // Paths are grouped per layer unless --continuous asked for one
        // uninterrupted polyline.
        let paths: Vec<Vec<[f64; 3]>> = if args.settings.split_layers {
            model
                .layers
                .iter()
                .map(|layer| model.layer_points(layer))
                .collect()
        } else {
            vec![model.path_points()]
        };
        let export = ModelExport {
            model: &model,
            paths,
        };

        let file = std::fs::File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &export)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(file = %path.display(), "model exported");
    }

    Ok(())
}
