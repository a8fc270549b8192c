use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "wp-publish", version)]
#[command(
    about = "Publish a local article to WordPress",
    long_about = "Read an article with a --- delimited front matter block and create a post from it\n\
through the WordPress REST API. The connection is configured with the WORDPRESS_URL,\n\
WORDPRESS_USERNAME and WORDPRESS_APP_PASSWORD environment variables. On success a\n\
<file>.published marker is written next to the article."
)]
pub struct Cli {
    #[arg(
        value_name = "FILE",
        help = "Path to the article file",
        long_help = "Path to the article to publish. Relative paths are resolved against the current directory."
    )]
    pub file: PathBuf,
    #[arg(
        long,
        help = "Print the request payload instead of publishing",
        long_help = "Parse the article and print the JSON payload that would be sent. No request is made and no marker is written."
    )]
    pub dry_run: bool,
    #[arg(
        short,
        long,
        help = "Print debug information while publishing",
        long_help = "Enable debug logging. RUST_LOG takes precedence when it is set."
    )]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positional_file() {
        let cli = Cli::try_parse_from(["wp-publish", "posts/hello.md"]).unwrap();
        assert_eq!(cli.file, PathBuf::from("posts/hello.md"));
        assert!(!cli.dry_run);
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from(["wp-publish", "--dry-run", "-v", "a.md"]).unwrap();
        assert!(cli.dry_run);
        assert!(cli.verbose);
    }

    #[test]
    fn requires_file() {
        assert!(Cli::try_parse_from(["wp-publish"]).is_err());
    }
}
