use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use oklch_ramps::{GamutMap, Oklch, Ramp, DEFAULT_RAMPS};

type Err = Box<dyn Error>;

/// Lower the chroma by bisection until the color fits in sRGB.
fn reduce_chroma(c: Oklch) -> Oklch {
    if c.in_srgb_gamut() { return c }
    let (mut lo, mut hi) = (0., c.chroma);
    for _ in 0 .. 24 {
        let mid = 0.5 * (lo + hi);
        if (Oklch { chroma: mid, ..c }).in_srgb_gamut() { lo = mid }
        else { hi = mid }
    }
    Oklch { chroma: lo, ..c }
}

fn strip(fh: &mut impl Write, colors: &[Oklch], width: u32)
         -> Result<(), Err> {
    writeln!(fh, "<tr>")?;
    for c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: {}\"></td>", c.to_hex())?;
    }
    writeln!(fh, "</tr>")?;
    Ok(())
}

/// Sample `ramp` on `n` lightnesses, without and with gamut mapping.
fn ramp<M: GamutMap>(fh: &mut impl Write, ramp: &Ramp<M>, n: usize,
                     width: u32, comment: &str) -> Result<(), Err> {
    let raw: Vec<Oklch> = Ramp::new(ramp.base_colors())?.stops(0., 1., n)
        .map(|(_, c)| c).collect();
    let mapped: Vec<Oklch> = ramp.stops(0., 1., n).map(|(_, c)| c).collect();
    let outside = raw.iter().filter(|c| !c.in_srgb_gamut()).count();
    writeln!(fh, "<h4>{comment} ({outside} of {n} shades outside sRGB)</h4>\n\
                  <table style=\"border: 0px;  border-spacing: 0px\">")?;
    strip(fh, &raw, width)?;
    strip(fh, &mapped, width)?;
    writeln!(fh, "</table>")?;
    Ok(())
}

fn main() -> Result<(), Err> {
    let mut fh = BufWriter::new(File::create("ramps.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>oklch-ramps: {}</title>\n\
                  </head>\n\
                  <body>\n\
                  <p>Top: shades clamped by the sRGB conversion. \
                  Bottom: chroma reduced until in gamut.</p>",
             env::args().next().unwrap_or_default())?;
    for named in DEFAULT_RAMPS.iter() {
        let r = named.ramp()?.with_gamut_map(reduce_chroma);
        ramp(&mut fh, &r, 10, 43, &named.name)?;
        ramp(&mut fh, &r, 150, 3, &named.name)?;
    }
    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
