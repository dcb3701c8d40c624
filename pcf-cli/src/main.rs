use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pcf_font::{DecodeOptions, Glyph, PcfFont, RowWidth};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "pcfont",
    about = "Inspect and dump glyphs from PCF bitmap fonts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show header and table information for a PCF font
    Info {
        /// Input PCF font file
        font: PathBuf,
    },

    /// Dump one glyph as ASCII art
    Dump {
        /// Input PCF font file
        font: PathBuf,

        /// Character to dump
        #[arg(short, long)]
        char: char,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the derived row width with a fixed byte count
        #[arg(long)]
        row_bytes: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Info { font } => info(&font),
        Commands::Dump {
            font,
            char,
            output,
            row_bytes,
        } => dump(&font, char, output.as_deref(), row_bytes),
    }
}

fn info(path: &Path) -> Result<()> {
    let font = PcfFont::open(path).with_context(|| format!("opening {}", path.display()))?;

    let header = font.header();
    println!("magic: {:02X?} (valid: {})", header.magic, header.magic_matches());
    println!("tables: {}", header.table_count);
    println!("glyphs: {}", font.glyph_count());
    println!(
        "metrics: {} entries ({})",
        font.metrics().count(),
        if font.metrics().is_compressed() {
            "compressed"
        } else {
            "uncompressed"
        }
    );

    let (min2, max2, minb1, maxb1) = font.encoding().code_range();
    if font.encoding().is_single_byte() {
        println!("encoding: single-byte, codes 0x{min2:02X}..=0x{max2:02X}");
    } else {
        println!(
            "encoding: two-byte, byte1 0x{minb1:02X}..=0x{maxb1:02X}, byte2 0x{min2:02X}..=0x{max2:02X}"
        );
    }
    println!("default char: 0x{:04X}", font.encoding().default_char());
    println!("bitmap sizes: {:?}", font.bitmap().bitmap_sizes());

    Ok(())
}

fn dump(path: &Path, ch: char, output: Option<&Path>, row_bytes: Option<usize>) -> Result<()> {
    let options = DecodeOptions {
        row_width: match row_bytes {
            Some(n) => RowWidth::Fixed(n),
            None => RowWidth::Derived,
        },
    };
    let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut font = PcfFont::with_options(file, options)?;

    let glyph = font
        .glyph(ch)
        .with_context(|| format!("looking up {ch:?}"))?;
    let art = render_ascii(&glyph);

    match output {
        Some(out) => {
            std::fs::write(out, art).with_context(|| format!("writing {}", out.display()))?
        }
        None => std::io::stdout().write_all(art.as_bytes())?,
    }
    Ok(())
}

/// Render a glyph raster as one line of `@`/`.` per padded row.
fn render_ascii(glyph: &Glyph) -> String {
    let mut out = String::new();
    for row in glyph.rows() {
        for byte in row {
            for bit in (0..8).rev() {
                out.push(if byte & (1 << bit) != 0 { '@' } else { '.' });
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcf_font::MetricEntry;

    #[test]
    fn test_render_ascii_bits() {
        let glyph = Glyph {
            bytes: vec![0xFF, 0x00, 0x81, 0x00],
            row_bytes: 2,
            metrics: MetricEntry::default(),
        };
        let art = render_ascii(&glyph);
        assert_eq!(art, "@@@@@@@@........\n@......@........\n");
    }
}
