use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::pipeline::FilterDomain;
use crate::{Config, Result};
use serde::Serialize;

/// The filter domain along with the size of the data it was derived from.
#[derive(Debug, Clone, Serialize)]
pub struct DomainSummary {
    pub rows: usize,
    pub domain: FilterDomain,
}

/// Loads the data and reports its distinct suppliers, items and year bounds.
pub async fn domain(config: Config) -> Result<Out<DomainSummary>> {
    let dataset = config.dataset().await.pub_result(ErrorType::Data)?;
    let domain = dataset.domain().clone();
    let message = format!(
        "{} rows: {} suppliers, {} items, years {} to {}",
        dataset.len(),
        domain.suppliers().len(),
        domain.items().len(),
        domain.min_year(),
        domain.max_year()
    );
    Ok(Out::new(
        message,
        DomainSummary {
            rows: dataset.len(),
            domain,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_domain() {
        let env = TestEnv::new().await;
        let out = domain(env.config()).await.unwrap();
        assert_eq!(
            out.message(),
            "8 rows: 3 suppliers, 4 items, years 2019 to 2020"
        );
        let summary = out.structure().unwrap();
        assert_eq!(
            summary.domain.suppliers(),
            [
                "JIM BEAM BRANDS CO",
                "PWSWN INC",
                "REPUBLIC NATIONAL DISTRIBUTING CO"
            ]
        );
    }
}
