use anyhow::{bail, Result};
use biolex_core::{CorpusConfig, CorpusFamily, CorpusPipeline, CorpusStats, Split};
use console::style;

pub fn run(config: &CorpusConfig, splits: &[Split], ctd: bool) -> Result<()> {
    let family = if ctd {
        CorpusFamily::Ctd
    } else {
        CorpusFamily::Bc5cdr
    };
    let splits = if splits.is_empty() {
        Split::ALL.to_vec()
    } else {
        splits.to_vec()
    };

    let result = CorpusPipeline::new(config.clone()).run_splits(family, &splits);

    for (split, output) in &result.successful {
        eprintln!("{} {} {}", style("●").green(), family, style(split).bold());
        eprintln!("  Path: {}", output.source.display());
        print_stats(&output.stats);
    }
    for (split, error) in &result.failed {
        eprintln!("{} {} {}", style("○").red(), family, style(split).bold());
        eprintln!("  Error: {error}");
    }

    if result.success_count() > 1 {
        eprintln!("{} Total", style("●").blue());
        print_stats(&result.total_stats);
    }

    if result.success_count() == 0 {
        bail!("no split could be processed");
    }
    Ok(())
}

fn print_stats(stats: &CorpusStats) {
    eprintln!("  Documents: {}", stats.documents);
    eprintln!("  Mentions: {}", stats.mentions);
    eprintln!("  Relations: {}", stats.relations);
    eprintln!("  Lookup rows: {}", stats.lookup_rows);
}
