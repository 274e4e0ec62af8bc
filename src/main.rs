use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use citysoul::config::Config;
use citysoul::markdown::{format_record_detail, format_record_list, format_themes, format_values};
use citysoul::record::Record;
use citysoul::store::FileStore;
use citysoul::{
    CatalogError, Field, FilterCriteria, Location, NewMemory, RandomShuffle, Session, filter,
    format_records, related_items, search, seed,
};

/// Browse, search and export the cultural-heritage catalog.
#[derive(Parser, Debug)]
#[command(name = "citysoul", version)]
struct Cli {
    /// Directory holding saved items and user memories [env: CITYSOUL_DATA_DIR]
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seed catalog JSON file instead of the bundled data [env: CITYSOUL_CATALOG]
    #[arg(long)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Allowed category (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Allowed period (repeatable)
    #[arg(long = "period")]
    periods: Vec<String>,

    /// Allowed district (repeatable)
    #[arg(long = "district")]
    districts: Vec<String>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        FilterCriteria::new(args.categories, args.periods, args.districts)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every site in the catalog
    List,

    /// Show the distinct values of a field
    Values { field: Field },

    /// List sites matching category/period/district filters
    Filter(FilterArgs),

    /// Free-text search over title, description, tags and category
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Show one site and its related sites
    Show {
        id: u64,

        /// Number of related sites [env: CITYSOUL_RELATED_LIMIT]
        #[arg(long)]
        limit: Option<usize>,

        /// Seed for the random fill of related sites
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Export sites as json or csv to stdout
    Export {
        /// Output format: json or csv
        mode: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Only sites matching this search query
        #[arg(long)]
        query: Option<String>,

        /// Only saved sites
        #[arg(long)]
        saved: bool,
    },

    /// Save or unsave a site
    Save { id: u64 },

    /// List saved sites
    Saved,

    /// Add a memory of your own
    Add {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        period: String,
        #[arg(long)]
        district: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// Delete a memory you added
    Delete { id: u64 },

    /// List thematic collections
    Themes,

    /// List the sites of one thematic collection
    Theme { id: u64 },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("citysoul=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(path) = cli.catalog {
        config.catalog = Some(path);
    }

    let records = match &config.catalog {
        Some(path) => seed::load_records(path)?,
        None => seed::bundled_records()?,
    };
    info!(data_dir = %config.data_dir.display(), "opening session");
    let mut session = Session::open(records, FileStore::new(&config.data_dir))?;

    run(cli.command, &config, &mut session)
}

fn run(
    command: Command,
    config: &Config,
    session: &mut Session<FileStore>,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = session.catalog();
    match command {
        Command::List => {
            let all: Vec<_> = catalog.all().iter().collect();
            print!("{}", format_record_list("All sites", &all));
        }
        Command::Values { field } => {
            let name = format!("{field:?}");
            print!("{}", format_values(&name, &catalog.distinct_values(field)));
        }
        Command::Filter(args) => {
            let out = filter(catalog.all(), &args.into());
            print!("{}", format_record_list("Filtered sites", &out));
        }
        Command::Search { query } => {
            let query = query.join(" ");
            let out = search(catalog.all(), &query);
            print!("{}", format_record_list(&format!("Search: {query}"), &out));
        }
        Command::Show { id, limit, seed } => {
            let record = match catalog.by_id(id) {
                Ok(record) => record,
                Err(CatalogError::NotFound(id)) => {
                    warn!(id, "no such site, nothing selected");
                    return Ok(());
                }
            };
            let limit = limit.unwrap_or(config.related_limit);
            let mut shuffle = seed.map(RandomShuffle::with_seed).unwrap_or_default();
            let related = related_items(catalog, record, limit, &mut shuffle);
            print!(
                "{}",
                format_record_detail(record, &related, session.is_saved(id))
            );
        }
        Command::Export {
            mode,
            filters,
            query,
            saved,
        } => {
            let mut base: Vec<&Record> = match &query {
                Some(q) => search(catalog.all(), q),
                None => catalog.all().iter().collect(),
            };
            if saved {
                base.retain(|r| session.is_saved(r.id));
            }
            let out = filter(base, &filters.into());
            print!("{}", format_records(out, &mode)?);
        }
        Command::Save { id } => {
            let now_saved = session.toggle_saved(id)?;
            println!("{} #{id}", if now_saved { "saved" } else { "unsaved" });
        }
        Command::Saved => {
            let saved = session.saved_items();
            print!("{}", format_record_list("Saved sites", &saved));
        }
        Command::Add {
            title,
            description,
            category,
            period,
            district,
            lat,
            lng,
            tags,
        } => {
            let record = session.add_memory(NewMemory {
                title,
                description,
                category,
                period,
                district,
                location: Location { lat, lng },
                tags,
            })?;
            println!("added #{}: {}", record.id, record.title);
        }
        Command::Delete { id } => {
            let record = session.delete_memory(id)?;
            println!("deleted #{}: {}", record.id, record.title);
        }
        Command::Themes => {
            print!("{}", format_themes(&seed::bundled_themes()?));
        }
        Command::Theme { id } => {
            let themes = seed::bundled_themes()?;
            let Some(theme) = themes.iter().find(|t| t.id == id) else {
                warn!(id, "no such theme");
                return Ok(());
            };
            let items = catalog.theme_items(theme);
            print!("{}", format_record_list(&theme.title, &items));
        }
    }
    Ok(())
}
