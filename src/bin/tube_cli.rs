#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("tube_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fmt::Write as _;
    use std::fs;
    use std::num::NonZeroU32;
    use std::path::{Path, PathBuf};

    use tube_engine::geom::{
        DistanceMode, FacetPlacement, Tolerance, assemble_tube, inspect_layout_with_tolerance,
    };
    use tube_engine::lod::{LodBase, LodPreset};
    use tube_engine::present::tube_side_width;

    const SNAPSHOT_QUANTIZE: f64 = 1e-6;
    const SNAPSHOT_DECIMALS: usize = 6;

    const USAGE: &str = r#"tube_cli (tube-engine)

USAGE:
  tube_cli list
  tube_cli run <preset|all> [options]
  tube_cli width <sides> [radius]

PRESETS:
  working
  short_first_section
  skipped_section
  alternate_gap

OPTIONS (run):
  --sides <n>          Facets of the nearest section (default 32)
  --subdivisions <n>   Sub-segments per facet (default 1)
  --distance <d>       Distance from the axis (default 50)
  --mode <m>           `apothem` or `radius` (default apothem)
  --snap <path>        Write the snapshot to this file instead of stdout
  --overwrite          Overwrite an existing snapshot file
  -h, --help           Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                for preset in LodPreset::ALL {
                    println!("{}", preset.name());
                }
                Ok(())
            }
            "run" => cmd_run(&mut args),
            "width" => cmd_width(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn cmd_width(args: &mut Args) -> Result<(), String> {
        let sides: u32 = parse_value("sides", &args.next().ok_or("missing side count")?)?;
        let radius = match args.next() {
            Some(value) => parse_value("radius", &value)?,
            None => 50.0,
        };
        let width = tube_side_width(sides, radius).map_err(|e| e.to_string())?;
        println!("{width}");
        Ok(())
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let preset_name = args.next().ok_or("missing preset name")?;

        let mut base = LodBase::default();
        let mut snap_path: Option<PathBuf> = None;
        let mut overwrite = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--sides" => base.side_count = parse_value("--sides", &args.value("--sides")?)?,
                "--subdivisions" => {
                    let n: u32 = parse_value("--subdivisions", &args.value("--subdivisions")?)?;
                    base.subdivisions =
                        NonZeroU32::new(n).ok_or("--subdivisions must be at least 1")?;
                }
                "--distance" => {
                    base.distance_from_axis = parse_value("--distance", &args.value("--distance")?)?;
                }
                "--mode" => base.distance_mode = parse_mode(&args.value("--mode")?)?,
                "--snap" => snap_path = Some(PathBuf::from(args.value("--snap")?)),
                "--overwrite" => overwrite = true,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        let presets: Vec<LodPreset> = if preset_name == "all" {
            LodPreset::ALL.to_vec()
        } else {
            vec![LodPreset::from_name(&preset_name).ok_or_else(|| unknown_preset(&preset_name))?]
        };

        let mut snapshot = String::new();
        for preset in presets {
            snapshot.push_str(&run_preset(preset, &base)?);
        }

        if let Some(path) = snap_path.as_deref() {
            write_text_file(path, &snapshot, overwrite)?;
            eprintln!("wrote {}", path.display());
        } else {
            print!("{snapshot}");
        }

        Ok(())
    }

    fn run_preset(preset: LodPreset, base: &LodBase) -> Result<String, String> {
        let layout = preset.layout(base);
        let placements =
            assemble_tube(&layout).map_err(|e| format!("{}: {e}", preset.name()))?;
        let diagnostics = inspect_layout_with_tolerance(&layout, Tolerance::SEAM);

        eprintln!("{}: {}", preset.name(), diagnostics.summary());
        for warning in &diagnostics.warnings {
            eprintln!("  warning: {warning}");
        }

        Ok(snapshot(preset.name(), &placements))
    }

    fn snapshot(name: &str, placements: &[FacetPlacement]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "preset {name}");
        let _ = writeln!(out, "placements {}", placements.len());
        for p in placements {
            let _ = write!(out, "p {} {} ", p.index, p.segment);
            write_f64(&mut out, p.rotation_degrees);
            out.push(' ');
            write_f64(&mut out, p.width);
            out.push(' ');
            write_f64(&mut out, p.height);
            out.push(' ');
            write_f64(&mut out, p.longitudinal_offset);
            out.push(' ');
            write_f64(&mut out, p.scale_factor);
            if let Some(label) = p.label.as_deref() {
                let _ = write!(out, " \"{label}\"");
            }
            out.push('\n');
        }
        out
    }

    fn parse_mode(value: &str) -> Result<DistanceMode, String> {
        match value.trim().to_lowercase().as_str() {
            "apothem" => Ok(DistanceMode::Apothem),
            "radius" => Ok(DistanceMode::Radius),
            other => Err(format!("unknown mode `{other}` (expected apothem or radius)")),
        }
    }

    fn parse_value<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, String>
    where
        T::Err: std::fmt::Display,
    {
        value
            .parse()
            .map_err(|e| format!("invalid value `{value}` for {name}: {e}"))
    }

    fn unknown_preset(name: &str) -> String {
        let mut msg = String::new();
        msg.push_str(&format!("unknown preset `{name}`\n\navailable presets:\n"));
        for preset in LodPreset::ALL {
            msg.push_str(&format!("  {}\n", preset.name()));
        }
        msg
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        fs::write(path, text).map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn quantize_f64(value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
        if q == 0.0 { 0.0 } else { q }
    }

    fn write_f64(out: &mut String, value: f64) {
        let value = quantize_f64(value);
        let _ = write!(out, "{value:.SNAPSHOT_DECIMALS$}");
    }

    struct Args {
        inner: std::vec::IntoIter<String>,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self {
                inner: args.into_iter(),
            }
        }

        fn next(&mut self) -> Option<String> {
            self.inner.next()
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next().ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
