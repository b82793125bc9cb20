// SPDX-License-Identifier: MPL-2.0
use estate_gallery::api::HttpGalleryApi;
use estate_gallery::config;
use estate_gallery::domain::gallery::{ProjectId, TabId, TabItem};
use estate_gallery::gallery::GridView;
use estate_gallery::GalleryController;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

const HELP: &str = "\
estate-gallery: browse a project gallery from the command line

USAGE:
  estate-gallery (--slug <slug> | --project <id>) [OPTIONS]

OPTIONS:
  --api <url>          Gallery API base URL (overrides the config file)
  --slug <slug>        Project slug to resolve
  --project <id>       Numeric project id
  --tab <id>           Tab or sub-tab to open instead of the first tab
  --search <query>     Run a search after loading
  --pages <n>          Number of media pages to load [default: 1]
  --config-dir <dir>   Directory holding gallery.toml
  -h, --help           Print this help
";

struct Args {
    api: Option<String>,
    slug: Option<String>,
    project: Option<u64>,
    tab: Option<u64>,
    search: Option<String>,
    pages: u32,
    config_dir: Option<PathBuf>,
}

fn parse_args() -> Result<Option<Args>, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();
    if pargs.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let args = Args {
        api: pargs.opt_value_from_str("--api")?,
        slug: pargs.opt_value_from_str("--slug")?,
        project: pargs.opt_value_from_str("--project")?,
        tab: pargs.opt_value_from_str("--tab")?,
        search: pargs.opt_value_from_str("--search")?,
        pages: pargs.opt_value_from_str("--pages")?.unwrap_or(1),
        config_dir: pargs.opt_value_from_str("--config-dir")?,
    };
    let rest = pargs.finish();
    if !rest.is_empty() {
        log::warn!("Ignoring unexpected arguments: {rest:?}");
    }
    Ok(Some(args))
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("error: {}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> estate_gallery::Result<()> {
    let (mut settings, warning) = config::load_with_override(args.config_dir);
    if let Some(warning) = warning {
        log::warn!("{warning}");
    }
    if let Some(api) = args.api {
        settings.api.base_url = api;
    }

    let api = Arc::new(HttpGalleryApi::new(&settings.api)?);
    let mut gallery = GalleryController::new(api, settings, 1280.0);

    match (args.slug, args.project) {
        (Some(slug), _) => {
            gallery.load_project(&slug).await?;
        }
        (None, Some(id)) => {
            gallery.set_project(ProjectId(id));
            gallery.load_gallery().await?;
        }
        (None, None) => {
            eprintln!("error: one of --slug or --project is required\n\n{HELP}");
            return Ok(());
        }
    }

    if let Some(tab) = args.tab {
        if !gallery.select_tab(TabId(tab)).await? {
            log::warn!("Tab {tab} does not exist in this project");
        }
    }
    for _ in 1..args.pages {
        if !gallery.load_more().await? {
            break;
        }
    }
    if let Some(query) = args.search {
        gallery.run_search(&query).await?;
    }

    print_gallery(&gallery);
    Ok(())
}

fn print_tabs(tabs: &[TabItem], depth: usize) {
    for tab in tabs {
        println!("{:indent$}[{}] {} ({})", "", tab.id, tab.title, tab.media_count, indent = depth * 2);
        print_tabs(&tab.sub_tabs, depth + 1);
    }
}

fn print_gallery(gallery: &GalleryController) {
    let state = gallery.state();

    println!("Tabs:");
    print_tabs(&state.tabs, 1);

    if !state.breadcrumb.is_empty() {
        let trail: Vec<&str> = state.breadcrumb.iter().map(|crumb| crumb.title.as_str()).collect();
        println!("Breadcrumb: {}", trail.join(" > "));
    }
    if state.is_searching {
        println!("Search: {:?}", state.search_query);
    }

    match gallery.grid_view() {
        GridView::Loading => println!("Loading..."),
        GridView::Error(message) => println!("{message}"),
        GridView::Empty => println!("No media."),
        GridView::Items { rows, .. } => {
            for cell in rows.iter().flatten() {
                let item = cell.item;
                println!(
                    "  #{} {} [{}] {}",
                    item.id,
                    item.title,
                    item.media.kind.as_str(),
                    item.media.url
                );
            }
            if !state.is_searching {
                let pagination = &state.pagination;
                println!(
                    "Page {} ({} of {} items{})",
                    pagination.page,
                    state.media.len(),
                    pagination.total,
                    if pagination.has_more { ", more available" } else { "" }
                );
            }
        }
    }
}
