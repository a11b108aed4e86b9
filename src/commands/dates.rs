use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::DateCursor;
use crate::{Config, Result};

/// Lists every month, January to December of each year in the data, that can bound a chart range.
pub async fn dates(config: Config) -> Result<Out<Vec<DateCursor>>> {
    let dataset = config.dataset().await.pub_result(ErrorType::Data)?;
    let cursors = dataset.date_options();
    let message = cursors
        .iter()
        .map(|c| format!("{c}  {}", c.label()))
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Out::new(message, cursors))
}
