use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "customization-catalog")]
#[command(about = "Serve a catalog of rules and workflows over MCP", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: <config dir>/customization-catalog/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Published site URL, e.g. https://owner.github.io/repo/. Omit for local mode.
    #[arg(long)]
    pub site_url: Option<String>,

    /// Local checkout root holding docs/ and .windsurf/
    #[arg(short, long)]
    pub root: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from(["customization-catalog", "--root", "~/catalog", "-c", "cat.toml"]);
        check!(cli.root.as_deref() == Some("~/catalog"));
        check!(cli.config == Some(PathBuf::from("cat.toml")));
        check!(cli.site_url.is_none());
    }
}
