use std::{path::PathBuf, sync::Arc};

use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use festlist::{
    cli::{self, GenerateOptions},
    config,
    curation::CurationOptions,
    error,
    spotify::tracks::TracksPerArtist,
    types::PkceToken,
};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show the lineup of a festival page
    Lineup(LineupOptions),

    /// Look up artists on Spotify
    Artists(ArtistsOptions),

    #[clap(about = "Build a playlist from a festival lineup and/or given artists")]
    Generate(GenerateArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct LineupOptions {
    /// Festival page, e.g. https://www.songkick.com/festivals/1471/id/40754508-edc-orlando-2023
    url: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistsOptions {
    /// Artist names to search for
    #[clap(required = true)]
    names: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateArgs {
    /// Festival page to take the lineup from
    #[clap(long)]
    festival_url: Option<String>,

    /// Lineup artist to include; can be repeated (default: whole lineup)
    #[clap(long = "select", action = ArgAction::Append, requires = "festival_url")]
    selected: Vec<String>,

    /// Additional artist outside the lineup; can be repeated
    #[clap(long = "artist", action = ArgAction::Append)]
    manual_artists: Vec<String>,

    /// Playlist name (default: "Festival Playlist - <festival>")
    #[clap(long)]
    playlist_name: Option<String>,

    /// Top tracks fetched per artist
    #[clap(
        long,
        default_value_t = 5,
        value_parser = clap::value_parser!(u8)
            .range(TracksPerArtist::MIN as i64..=TracksPerArtist::MAX as i64)
    )]
    tracks_per_artist: u8,

    /// Keep remixes and edits next to the original songs
    #[clap(long)]
    include_remixes: bool,

    /// Keep every fetched song regardless of artist popularity
    #[clap(long)]
    no_popularity_filter: bool,

    /// Skip creating the playlist on Spotify
    #[clap(long)]
    no_create: bool,

    /// Skip the HTML dashboard
    #[clap(long)]
    no_dashboard: bool,

    /// Skip exporting the curated songs
    #[clap(long)]
    no_export: bool,

    /// Export the playlist artists as well
    #[clap(long, conflicts_with = "no_export")]
    export_artists: bool,

    /// Open the dashboard (or the playlist) in the browser when done
    #[clap(long)]
    open: bool,

    /// Folder for dashboards and exports
    #[clap(long)]
    output_dir: Option<PathBuf>,
}

impl GenerateArgs {
    fn into_options(self) -> GenerateOptions {
        let tracks_per_artist = match TracksPerArtist::new(self.tracks_per_artist) {
            Some(n) => n,
            None => error!(
                "--tracks-per-artist must be between {} and {}",
                TracksPerArtist::MIN,
                TracksPerArtist::MAX
            ),
        };

        GenerateOptions {
            festival_url: self.festival_url,
            selected: self.selected,
            manual_artists: self.manual_artists,
            playlist_name: self.playlist_name,
            tracks_per_artist,
            curation: CurationOptions {
                include_remixes: self.include_remixes,
                artist_popularity_filtering: !self.no_popularity_filter,
            },
            create_playlist: !self.no_create,
            dashboard: !self.no_dashboard,
            export_songs: !self.no_export,
            export_artists: self.export_artists,
            open: self.open,
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(cli::load_config(None), Arc::clone(&oauth_result)).await;
        }
        Command::Lineup(opt) => cli::show_lineup(opt.url).await,
        Command::Artists(opt) => cli::search_artists(cli::load_config(None), opt.names).await,
        Command::Generate(args) => {
            let config = cli::load_config(args.output_dir.clone());
            cli::generate(config, args.into_options()).await
        }
        Command::Completions(_) => {}
    }
}
