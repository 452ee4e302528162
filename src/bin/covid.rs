use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use covid_tracker::format::{format_count_locale, pretty_print_stat};
use covid_tracker::models::{CaseCategory, CaseCounts, Selection, Stats};
use covid_tracker::{Client, ClientConfig, chart, history, normalize, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "covid",
    version,
    about = "Fetch, tabulate & chart public COVID-19 statistics (disease.sh)"
)]
struct Cli {
    /// API base URL (default: $COVID_API_BASE_URL or https://disease.sh/v3/covid-19)
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the three info cards for the world or one country.
    Summary(SummaryArgs),
    /// Print countries sorted by confirmed cases (and optionally save them).
    Countries(CountriesArgs),
    /// Print the country picker options (name and code).
    Options,
    /// Daily new counts from the worldwide timeline (and optionally plot them).
    History(HistoryArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Category {
    Confirmed,
    Recovered,
    Deaths,
}

impl From<Category> for CaseCategory {
    fn from(c: Category) -> Self {
        match c {
            Category::Confirmed => CaseCategory::Confirmed,
            Category::Recovered => CaseCategory::Recovered,
            Category::Deaths => CaseCategory::Deaths,
        }
    }
}

#[derive(Args, Debug)]
struct SummaryArgs {
    /// Country code or name; "worldwide" (default) for global totals
    #[arg(short, long, default_value = "worldwide")]
    country: String,
    /// Locale for thousands separators (en, de, fr, es, it, pt, nl)
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(Args, Debug)]
struct CountriesArgs {
    /// Only print the first N rows.
    #[arg(long)]
    limit: Option<usize>,
    /// Save the sorted table to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Locale for thousands separators.
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(Args, Debug)]
struct HistoryArgs {
    /// Number of days of history to request.
    #[arg(long, default_value_t = 120)]
    days: u32,
    /// Which counter to difference.
    #[arg(long, value_enum, default_value_t = Category::Confirmed)]
    category: Category,
    /// Create a chart at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the plot (default 1000).
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Height of the plot (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Locale for thousands separators.
    #[arg(long, default_value = "en")]
    locale: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut cfg = ClientConfig::from_env();
    if let Some(url) = cli.base_url {
        cfg.base_url = url;
    }
    let client = Client::with_config(cfg).context("build http client")?;

    match cli.cmd {
        Command::Summary(args) => cmd_summary(&client, args),
        Command::Countries(args) => cmd_countries(&client, args),
        Command::Options => cmd_options(&client),
        Command::History(args) => cmd_history(&client, args),
    }
}

fn cmd_summary(client: &Client, args: SummaryArgs) -> Result<()> {
    let selection = Selection::parse(&args.country);
    let stats = client
        .fetch_selection(&selection)
        .with_context(|| format!("fetch stats for {}", selection))?;

    let heading = match &stats {
        Stats::Global(_) => "Worldwide".to_string(),
        Stats::Country(c) => c.country.clone(),
    };
    println!("{}", heading);
    for category in CaseCategory::ALL {
        println!(
            "{:<18} {:>10} today  {:>15} total",
            category.title(),
            pretty_print_stat(stats.today(category)),
            format_count_locale(stats.total(category), &args.locale),
        );
    }
    Ok(())
}

fn cmd_countries(client: &Client, args: CountriesArgs) -> Result<()> {
    let countries = client.fetch_countries().context("fetch country list")?;
    let list = normalize::normalize(countries);

    let shown = args.limit.unwrap_or(list.table.len()).min(list.table.len());
    for (i, c) in list.table.iter().take(shown).enumerate() {
        println!(
            "{:>4}  {:<32} {:>15}",
            i + 1,
            c.country,
            format_count_locale(c.cases, &args.locale)
        );
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_table_csv(&list.table, path)?,
            "json" => storage::save_table_json(&list.table, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", list.table.len(), path.display());
    }
    Ok(())
}

fn cmd_options(client: &Client) -> Result<()> {
    let countries = client.fetch_countries().context("fetch country list")?;
    println!("{:<6} Worldwide", Selection::WORLDWIDE);
    for opt in normalize::selection_options(&countries) {
        println!("{:<6} {}", opt.code, opt.name);
    }
    Ok(())
}

fn cmd_history(client: &Client, args: HistoryArgs) -> Result<()> {
    let category = CaseCategory::from(args.category);
    let timeline = client
        .fetch_history(args.days)
        .context("fetch worldwide timeline")?;
    let daily = history::daily_new(&timeline, category);

    println!("Worldwide new {}", category);
    for p in &daily {
        let value = if p.value < 0 {
            format!("-{}", format_count_locale(Some(p.value.unsigned_abs()), &args.locale))
        } else {
            format_count_locale(Some(p.value as u64), &args.locale)
        };
        println!("{}  {:>12}", p.date, value);
    }

    if let Some(plot_path) = args.plot.as_ref() {
        chart::plot_daily(&daily, plot_path, args.width, args.height, category)?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }
    Ok(())
}
