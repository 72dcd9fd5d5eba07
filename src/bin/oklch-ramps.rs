use std::{collections::HashSet,
          fs::{self, File},
          io::{self, BufWriter, Write},
          path::{Path, PathBuf}};
use anyhow::{bail, Context, Error};
use clap::Parser;
use oklch_ramps::{build_ramps, parse, NamedRamp, Oklch, DEFAULT_RAMPS};

/// Shades darker than this get light text.
const DARK_SWATCH: f64 = 0.80;

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Format {
    /// An HTML table of swatches.
    Html,
    /// CSS custom properties, on the standard output.
    Css,
}

/// Generate perceptually uniform color ramps in OKLCH.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Lightness percentages, 0-100, separated by commas.
    #[arg(short, long,
          default_value = "30%, 42%, 47%, 56%, 65%, 78%, 90%, 95%, 98%")]
    lightnesses: String,

    /// Hex colors (1234ab) separated by commas, added as a "Custom" ramp.
    #[arg(short, long)]
    colors: Option<String>,

    /// JSON file with a list of ramps to use instead of the built-in ones.
    #[arg(short, long)]
    ramps: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, default_value = "html")]
    format: Format,

    /// File the HTML table is written to.
    #[arg(short, long, default_value = "ramps.html")]
    output: PathBuf,
}

fn load_ramps(path: &Path) -> Result<Vec<NamedRamp>, Error> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let ramps = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a list of ramps", path.display()))?;
    Ok(ramps)
}

fn percent(lightness: f64) -> f64 { (lightness * 1000.).round() / 10. }

/// Escape text inserted in HTML content or attribute values.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('"', "&quot;")
}

/// Keep only characters allowed in a CSS identifier.
fn css_ident(s: &str) -> String {
    s.to_lowercase().chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c }
                 else { '-' })
        .collect()
}

fn swatch(fh: &mut impl Write, c: &Oklch) -> io::Result<()> {
    let text = if c.lightness < DARK_SWATCH { "white" } else { "black" };
    let (title, mark) = if c.in_srgb_gamut() { ("", "") }
                        else { (" title=\"outside of sRGB\"", " *") };
    writeln!(fh, "  <td{title} style=\"width: 72px; height: 72px; \
                  padding: 4px; font-size: 12px; color: {text}; \
                  background-color: {c}\">\
                  L {}%<br/>C {:.2}<br/>H {}°{mark}</td>",
             percent(c.lightness), c.chroma, c.hue.round())
}

fn write_html(fh: &mut impl Write, lightnesses: &[f64],
              ramps: &[(&str, Vec<Oklch>)]) -> io::Result<()> {
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>OKLCH color ramps</title>\n\
                  </head>\n\
                  <body>\n\
                  <h1>OKLCH color ramps</h1>")?;
    writeln!(fh, "<table style=\"border-spacing: 4px\">\n<tr>\n  <th></th>")?;
    for &l in lightnesses {
        writeln!(fh, "  <th>{}</th>", percent(l))?;
    }
    writeln!(fh, "</tr>")?;
    for (name, shades) in ramps {
        writeln!(fh, "<tr>\n  <th>{}</th>", escape_html(name))?;
        for c in shades {
            swatch(fh, c)?;
        }
        writeln!(fh, "</tr>")?;
    }
    writeln!(fh, "</table>\n\
                  <p>* outside of the sRGB gamut.</p>\n\
                  </body>\n\
                  </html>")
}

fn write_css(fh: &mut impl Write, ramps: &[(&str, Vec<Oklch>)])
             -> io::Result<()> {
    let mut seen = HashSet::new();
    writeln!(fh, ":root {{")?;
    for (name, shades) in ramps {
        let name = css_ident(name);
        for c in shades {
            let stop = percent(c.lightness).to_string().replace('.', "_");
            let mut var = format!("--{name}-{stop}");
            let mut k = 1;
            while !seen.insert(var.clone()) {
                k += 1;
                var = format!("--{name}-{stop}-{k}");
            }
            writeln!(fh, "  {var}: {c};")?;
        }
    }
    writeln!(fh, "}}")
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let cli = Cli::parse();

    let lightnesses = parse::parse_lightnesses(&cli.lightnesses);
    let mut ramps = match &cli.ramps {
        Some(path) => load_ramps(path)?,
        None => DEFAULT_RAMPS.clone(),
    };
    if let Some(input) = &cli.colors {
        let colors = parse::parse_colors(input);
        if colors.is_empty() {
            bail!("no valid color in “{input}”");
        }
        ramps.push(NamedRamp::new("Custom", colors));
    }

    let shades: Vec<(&str, Vec<Oklch>)> = build_ramps(&ramps, &lightnesses)
        .into_iter()
        .filter_map(|(name, shades)| match shades {
            Ok(shades) => Some((name, shades)),
            Err(err) => {
                log::error!("skipping ramp “{name}”: {err}");
                None
            }
        })
        .collect();

    match cli.format {
        Format::Html => {
            let mut fh = BufWriter::new(File::create(&cli.output)
                .with_context(|| format!("cannot create {}",
                                         cli.output.display()))?);
            write_html(&mut fh, &lightnesses, &shades)?;
            fh.flush()?;
            log::info!("wrote {} ramps to {}", shades.len(),
                       cli.output.display());
        }
        Format::Css => write_css(&mut io::stdout().lock(), &shades)?,
    }
    Ok(())
}
