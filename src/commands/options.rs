use crate::args::OptionsArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::anyhow;

/// Lists the suppliers or items containing the search text, in sorted order, up to the limit.
pub async fn options(config: Config, args: OptionsArgs) -> Result<Out<Vec<String>>> {
    let limit = args.limit().unwrap_or(config.option_limit());
    if limit == 0 {
        return Err(anyhow!("The option limit must be at least 1")).pub_result(ErrorType::Request);
    }

    let dataset = config.dataset().await.pub_result(ErrorType::Data)?;
    let options: Vec<String> = dataset
        .options(args.kind(), args.search(), limit)
        .into_iter()
        .map(String::from)
        .collect();

    let message = if options.is_empty() {
        format!("No {} matches '{}'", args.kind(), args.search())
    } else {
        options.join("\n")
    };
    Ok(Out::new(message, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FilterKind;
    use crate::test::{TestEnv, REPUBLIC};

    #[tokio::test]
    async fn test_options_search() {
        let env = TestEnv::new().await;
        let out = options(env.config(), OptionsArgs::new(FilterKind::Supplier, "In", None))
            .await
            .unwrap();
        assert_eq!(
            out.structure().unwrap(),
            &vec![String::from("PWSWN INC"), String::from(REPUBLIC)]
        );
        assert_eq!(out.message(), format!("PWSWN INC\n{REPUBLIC}"));
    }

    #[tokio::test]
    async fn test_options_limit() {
        let env = TestEnv::new().await;
        let out = options(env.config(), OptionsArgs::new(FilterKind::Item, "", Some(2)))
            .await
            .unwrap();
        assert_eq!(
            out.structure().unwrap(),
            &vec![
                String::from("KNOB CREEK BOURBON 9YR - 100P - 375ML"),
                String::from("MOMENT DE PLAISIR - 750ML"),
            ]
        );
    }

    #[tokio::test]
    async fn test_options_no_match() {
        let env = TestEnv::new().await;
        let out = options(env.config(), OptionsArgs::new(FilterKind::Item, "vodka", None))
            .await
            .unwrap();
        assert!(out.structure().unwrap().is_empty());
        assert_eq!(out.message(), "No item matches 'vodka'");
    }

    #[tokio::test]
    async fn test_options_zero_limit() {
        let env = TestEnv::new().await;
        let err = options(env.config(), OptionsArgs::new(FilterKind::Item, "", Some(0)))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "request error");
    }
}
