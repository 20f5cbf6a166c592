use clap::Parser;
use color_eyre::Result;
use std::io::{BufRead, Write};
use std::path::Path;
use vgdrill::{
    chart_export, AppConfig, Args, ClickEvent, ConfigManager, Dashboard, DashboardView,
    OpenOptions, SalesTable, APP_NAME,
};

fn print_view(view: &DashboardView) {
    if let Some(detail) = &view.detail {
        println!(
            "selected {} rows; next levels: {}",
            detail.row_count,
            detail.levels.join(", ")
        );
        let total: f64 = detail.bars.iter().map(|b| b.total_sales).sum();
        println!("total sales in selection: {:.2}M units", total);
        for bar in detail.bars.iter().take(10) {
            println!("  {:<30} {:>8.2}M", bar.developer, bar.total_sales);
        }
        if detail.bars.len() > 10 {
            println!("  ... and {} more developers", detail.bars.len() - 10);
        }
    } else {
        let consoles = view
            .overview
            .iter()
            .filter(|n| n.parent.is_empty())
            .count();
        println!(
            "top-level view: {} consoles, {} scatter points",
            consoles,
            view.scatter.len()
        );
    }
}

fn export_view(view: &DashboardView, dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    chart_export::write_sunburst_json(&dir.join("overview.json"), &view.overview)?;
    if !view.scatter.is_empty() {
        chart_export::write_scatter_png(&dir.join("scatter.png"), &view.scatter)?;
    }
    if let Some(detail) = &view.detail {
        chart_export::write_sunburst_json(&dir.join("detail.json"), &detail.sunburst)?;
        if !detail.regional.is_empty() {
            chart_export::write_sunburst_json(&dir.join("regional.json"), &detail.regional)?;
        }
        if !detail.bars.is_empty() {
            chart_export::write_bars_png(&dir.join("developers.png"), &detail.bars)?;
        }
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let config = AppConfig::load(APP_NAME)?;
    let options = OpenOptions::from_args_and_config(args, &config);

    log::info!("loading sales data from {}", args.path.display());
    let table = SalesTable::from_csv(&args.path, &options)?;
    log::info!("loaded {} rows", table.height());

    let mut dashboard = Dashboard::new(table, &config, args.seed)?;

    let view = dashboard.root_view()?;
    print_view(&view);
    if let Some(dir) = &args.export_dir {
        export_view(&view, dir)?;
    }

    println!("enter a node path (e.g. \"Console A/Publisher X\"), blank to reset, \"quit\" to exit");
    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        if line == "quit" || line == "exit" {
            break;
        }

        let event = if line.trim().is_empty() {
            ClickEvent::root()
        } else {
            ClickEvent::node(line)
        };
        let view = match dashboard.click(&event) {
            Ok(view) => view,
            Err(e) => {
                log::error!("could not rebuild the view: {}", e);
                continue;
            }
        };
        print_view(&view);
        if let Some(dir) = &args.export_dir {
            export_view(&view, dir)?;
        }
    }

    Ok(())
}

fn handle_early_exit_flags(args: &Args) -> Result<Option<()>> {
    if args.write_config {
        let config = ConfigManager::new(APP_NAME)?;
        match config.write_default_config(args.force) {
            Ok(path) => {
                println!("Wrote default config to {}", path.display());
                return Ok(Some(()));
            }
            Err(e) => {
                eprintln!("Error writing config: {}", e);
                std::process::exit(1);
            }
        }
    }

    Ok(None)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    color_eyre::install()?;

    if let Some(()) = handle_early_exit_flags(&args)? {
        return Ok(());
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
