use crate::infra::build_site;
use clap::Args;
use std::path::PathBuf;
use tourbook::catalog::SourceKind;
use tourbook::config::AppConfig;
use tourbook::error::AppError;
use tourbook::site::RouteOutcome;
use tourbook::sitemap::SitemapEntry;

#[derive(Args, Debug, Default)]
pub(crate) struct SitemapArgs {
    /// Only list entries from the hotel source
    #[arg(long)]
    pub(crate) hotels_only: bool,
    /// Catalog CSV export to read offers from (overrides CATALOG_CSV)
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ResolveArgs {
    /// Request path to route, e.g. /fr/news/my-post
    pub(crate) path: String,
}

pub(crate) async fn run_sitemap(args: SitemapArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;
    if let Some(path) = args.catalog_csv {
        config.site.catalog_csv = Some(path);
    }

    let (site, _) = build_site(&config.site)?;
    let entries = if args.hotels_only {
        site.sitemap
            .build_restricted(&[SourceKind::Hotels])
            .await?
    } else {
        site.sitemap.build().await?
    };

    render_sitemap(&entries, args.hotels_only);
    Ok(())
}

pub(crate) fn run_resolve(args: ResolveArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let (site, _) = build_site(&config.site)?;
    println!("{}", describe_route(site.directory.route(&args.path)));
    Ok(())
}

fn describe_route(outcome: RouteOutcome<'_>) -> String {
    match outcome {
        RouteOutcome::Redirect(target) => format!("301 -> {target}"),
        RouteOutcome::Page(page) => format!(
            "200 page {} [{}]: {}",
            page.path, page.locale, page.title
        ),
        RouteOutcome::NotFound { locale, path } => format!("404 no page {path} [{locale}]"),
    }
}

fn render_sitemap(entries: &[SitemapEntry], hotels_only: bool) {
    if hotels_only {
        println!("Hotel sitemap ({} entries)", entries.len());
    } else {
        println!("Sitemap ({} entries)", entries.len());
    }

    for entry in entries {
        let priority = entry
            .priority
            .map(|value| format!(" priority {value:.1}"))
            .unwrap_or_default();
        let modified = entry
            .last_modified
            .map(|value| format!(" modified {}", value.format("%Y-%m-%d")))
            .unwrap_or_default();
        println!("- {}{}{}", entry.url, priority, modified);
    }
}
