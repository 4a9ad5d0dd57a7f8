//! Per-URL result rendering

use std::io::{self, Write};
use swagcheck_vuln::Advisory;

/// Render the outcome for one URL: `[VULNERABLE]` with the applicable
/// advisories, `[OK]` for a classified-but-clean instance, or `[UNKNOWN]`
/// when no version could be determined.
pub fn print_outcome(
    out: &mut impl Write,
    url: &str,
    version: Option<&str>,
    vulns: &[&Advisory],
    one_line: bool,
) -> io::Result<()> {
    if !one_line {
        writeln!(out)?;
    }

    match version {
        Some(ver) if !vulns.is_empty() => {
            writeln!(out, "URL {} - [VULNERABLE] Version {}", url, ver)?;
            if one_line {
                return Ok(());
            }
            writeln!(out, "---------")?;
            writeln!(out)?;
            writeln!(out, "This swagger-ui is vulnerable to:")?;
            for advisory in vulns {
                writeln!(out, "  - [{}]({})", advisory.name, advisory.link)?;
            }
        }
        Some(ver) => {
            writeln!(out, "URL {} - [OK] Version {}", url, ver)?;
            if one_line {
                return Ok(());
            }
            writeln!(out, "---------")?;
            writeln!(out, "This swagger-ui is not vulnerable.")?;
        }
        None => {
            writeln!(out, "URL {} - [UNKNOWN] Version unknown.", url)?;
            if one_line {
                return Ok(());
            }
            writeln!(out, "---------")?;
        }
    }
    writeln!(out)?;
    Ok(())
}
