use std::fmt::Write as _;

/// Builder for an instrument page in the layout the default selectors expect.
///
/// Values are inserted verbatim, so malformed prices or dates can be rendered
/// on purpose.
#[derive(Debug, Clone, Default)]
pub struct PageFixture {
    full: String,
    short: String,
    price: String,
    forecasts: Vec<String>,
    dates: Vec<String>,
}

impl PageFixture {
    /// Start a page for an instrument quoted at `price`.
    #[must_use]
    pub fn new(full: &str, short: &str, price: &str) -> Self {
        Self {
            full: full.to_string(),
            short: short.to_string(),
            price: price.to_string(),
            ..Self::default()
        }
    }

    /// Append a forecast block with its target price and date.
    #[must_use]
    pub fn forecast(mut self, price: &str, date: &str) -> Self {
        self.forecasts.push(price.to_string());
        self.dates.push(date.to_string());
        self
    }

    /// Append a target price with no date next to it.
    #[must_use]
    pub fn undated_forecast(mut self, price: &str) -> Self {
        self.forecasts.push(price.to_string());
        self
    }

    /// Append a date with no target price next to it.
    #[must_use]
    pub fn stray_date(mut self, date: &str) -> Self {
        self.dates.push(date.to_string());
        self
    }

    /// Render the page markup.
    #[must_use]
    pub fn render(&self) -> String {
        let mut reviews = String::new();
        let blocks = self.forecasts.len().max(self.dates.len());
        for i in 0..blocks {
            reviews.push_str("  <div class=\"item__review\">\n");
            if let Some(p) = self.forecasts.get(i) {
                let _ = writeln!(reviews, "    <span class=\"item__review__sum\">{p}</span>");
            }
            if let Some(d) = self.dates.get(i) {
                let _ = writeln!(reviews, "    <span class=\"item__review__date_big\">{d}</span>");
            }
            reviews.push_str("  </div>\n");
        }

        format!(
            r#"<!DOCTYPE html>
<html><head><meta charset="utf-8"><title>{short}</title></head><body>
<div class="header__tool">
  <h1 class="header__tool__name-full">{full}</h1>
  <span class="header__tool__name-short">{short}</span>
</div>
<div class="chart__info"><span class="chart__info__sum">{price}</span></div>
<div class="js-review">
{reviews}</div>
</body></html>
"#,
            full = self.full,
            short = self.short,
            price = self.price,
        )
    }
}
