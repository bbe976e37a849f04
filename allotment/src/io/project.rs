use crate::error::Result;
use crate::model::Plot;

/// Reads a plot document (one plot with its beds, seasons and plans) from JSON.
pub fn read_plot_json(path: &str) -> Result<Plot> {
    let contents = std::fs::read_to_string(path)?;
    let plot: Plot = serde_json::from_str(&contents)?;
    log::info!(
        "loaded plot {} with {} bed(s) and {} season(s) from {}",
        plot.id,
        plot.beds.len(),
        plot.seasons.len(),
        path
    );
    Ok(plot)
}

/// Writes a plot document as pretty-printed JSON, replacing the file.
pub fn write_plot_json(path: &str, plot: &Plot) -> Result<()> {
    let json = serde_json::to_string_pretty(plot)?;
    std::fs::write(path, json)?;
    Ok(())
}
