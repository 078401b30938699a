use candela_core::connector::CandleProvider;
use candela_core::{CandelaError, CandleRequest, CandleWindow, Clock, Pacer, RawCandle};

/// Walk backward from `clock.now()` one page at a time.
///
/// Each page covers `limit` native bars ending where the previous page began.
/// Returns the fragments newest window first. Stops once the window's start
/// date is covered, after one page for small requests, or after `max_pages`
/// pages. The pacer is consulted only between pages.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "candela::router::paginate",
        skip(provider, window, clock, pacer),
        fields(
            timeframe = window.timeframe().label,
            granularity = window.timeframe().granularity,
            limit = window.limit(),
            from = %window.from(),
        ),
    )
)]
pub async fn paginate(
    provider: &dyn CandleProvider,
    symbol: &str,
    window: &CandleWindow,
    clock: &dyn Clock,
    pacer: &dyn Pacer,
    max_pages: usize,
) -> Result<Vec<Vec<RawCandle>>, CandelaError> {
    let granularity = window.timeframe().granularity;
    let span = window.page_span();
    let mut end = clock.now();
    let mut fragments: Vec<Vec<RawCandle>> = Vec::new();

    loop {
        let start = end.checked_sub_signed(span).ok_or_else(|| {
            CandelaError::InvalidArg(format!("page window before {end} is out of range"))
        })?;
        let req = CandleRequest::try_new(symbol, start, end, granularity)?;
        let mut rows = provider.candles(&req).await?;
        if window.keeps_last_row_only() {
            let last = rows.pop();
            rows = last.into_iter().collect();
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(page = fragments.len() + 1, %start, %end, rows = rows.len(), "page fetched");
        fragments.push(rows);

        if window.is_last_page(start) {
            break;
        }
        if fragments.len() >= max_pages {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                max_pages,
                reached = %start,
                "page cap hit before start date; using pages fetched so far"
            );
            break;
        }
        pacer.pause().await;
        end = start;
    }

    Ok(fragments)
}
