//! Paging query parameter helpers.

use salvo::oapi::extract::QueryParam;

/// Reads a paging parameter, treating absent or unparseable values as `0` so
/// the service falls back to its defaults.
pub(crate) trait PagingParamExt {
    fn into_paging_value(self) -> i64;
}

impl PagingParamExt for QueryParam<String, false> {
    fn into_paging_value(self) -> i64 {
        parse_paging_value(self.into_inner().as_deref())
    }
}

fn parse_paging_value(value: Option<&str>) -> i64 {
    value
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or_default()
}
