//! Revenue chart shaping for the analytics view.

use chrono::NaiveDate;

use crate::models::RevenuePoint;

/// The chart shows at most this many days.
pub const MAX_BARS: usize = 5;

/// Smallest bar height, in percent, so tiny values stay visible.
pub const MIN_BAR_PERCENT: f64 = 4.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ChartBar {
    pub date: NaiveDate,
    pub revenue: f64,
    pub orders: u32,
    /// Height relative to the tallest bar, in `MIN_BAR_PERCENT..=100`.
    pub height_percent: f64,
}

impl ChartBar {
    pub fn label(&self) -> String {
        self.date.format("%b %d").to_string()
    }
}

/// The last [`MAX_BARS`] days with strictly positive revenue, oldest first,
/// scaled against the largest of them.
pub fn chart_bars(series: &[RevenuePoint]) -> Vec<ChartBar> {
    let mut days: Vec<&RevenuePoint> = series.iter().filter(|p| p.revenue > 0.0).collect();
    days.sort_by_key(|p| p.date);
    let days = &days[days.len().saturating_sub(MAX_BARS)..];

    let max = days.iter().map(|p| p.revenue).fold(0.0_f64, f64::max);

    days.iter()
        .map(|p| {
            let height = if max > 0.0 { p.revenue / max * 100.0 } else { 0.0 };
            ChartBar {
                date: p.date,
                revenue: p.revenue,
                orders: p.orders,
                height_percent: height.max(MIN_BAR_PERCENT),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(day: u32, revenue: f64) -> RevenuePoint {
        RevenuePoint {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            revenue,
            orders: 1,
        }
    }

    #[test]
    fn test_keeps_last_five_positive_days_in_order() {
        let series = vec![
            point(9, 90.0),
            point(1, 10.0),
            point(2, 0.0),
            point(3, 30.0),
            point(8, 0.0),
            point(4, 40.0),
            point(6, 60.0),
            point(7, 70.0),
        ];
        let bars = chart_bars(&series);
        assert_eq!(bars.len(), MAX_BARS);
        let days: Vec<u32> = bars.iter().map(|b| b.date.format("%d").to_string().parse().unwrap()).collect();
        assert_eq!(days, vec![3, 4, 6, 7, 9]);
        assert!(bars.iter().all(|b| b.revenue > 0.0));
    }

    #[test]
    fn test_heights_scale_to_local_maximum() {
        let bars = chart_bars(&[point(1, 50.0), point(2, 100.0), point(3, 25.0)]);
        let heights: Vec<f64> = bars.iter().map(|b| b.height_percent).collect();
        assert_eq!(heights, vec![50.0, 100.0, 25.0]);
    }

    #[test]
    fn test_tiny_values_are_clamped_to_minimum() {
        let bars = chart_bars(&[point(1, 1.0), point(2, 1000.0)]);
        assert_eq!(bars[0].height_percent, MIN_BAR_PERCENT);
        assert_eq!(bars[1].height_percent, 100.0);
    }

    #[test]
    fn test_no_revenue_means_no_bars() {
        assert!(chart_bars(&[]).is_empty());
        assert!(chart_bars(&[point(1, 0.0), point(2, -5.0)]).is_empty());
    }

    #[test]
    fn test_label_format() {
        let bars = chart_bars(&[point(3, 10.0)]);
        assert_eq!(bars[0].label(), "May 03");
    }
}
