//! 観測日によるスナップショット分割を担当するモジュール
//!
//! データセット全体の最古の観測日と最新の観測日を求め、
//! それぞれの日付に一致する物件を「旧」「新」のスナップショットに振り分けます。
//! 両端の間の日付に観測された物件はどちらにも含まれません。

use super::error::AnalyzerError;
use super::listing::PricedListing;
use chrono::NaiveDate;
use tracing::debug;

/// 旧・新2つのスナップショット
///
/// # フィールド
///
/// - `old_date`: データセット全体の最古の観測日
/// - `new_date`: データセット全体の最新の観測日
/// - `old`: `old_date`に観測された物件
/// - `new`: `new_date`に観測された物件
/// - `excluded`: 両端の間の日付のため除外された物件数
#[derive(Debug)]
pub struct Snapshots {
    pub old_date: NaiveDate,
    pub new_date: NaiveDate,
    pub old: Vec<PricedListing>,
    pub new: Vec<PricedListing>,
    pub excluded: usize,
}

/// 物件を最古日・最新日のスナップショットに分割します
///
/// すべての物件が同じ日付の場合、`old`と`new`は同一の内容になります。
///
/// # エラー
///
/// 入力が空の場合に`AnalyzerError::EmptyDataset`を返します。
pub fn partition(listings: Vec<PricedListing>) -> Result<Snapshots, AnalyzerError> {
    let dates = listings.iter().map(|l| l.listing.observed_at);
    let (old_date, new_date) = match (dates.clone().min(), dates.max()) {
        (Some(min), Some(max)) => (min, max),
        _ => {
            return Err(AnalyzerError::EmptyDataset(
                "no listings to partition".to_string(),
            ))
        }
    };

    let mut old = Vec::new();
    let mut new = Vec::new();
    let mut excluded = 0;

    for listing in listings {
        let date = listing.listing.observed_at;
        if date == old_date && date == new_date {
            old.push(listing.clone());
            new.push(listing);
        } else if date == old_date {
            old.push(listing);
        } else if date == new_date {
            new.push(listing);
        } else {
            excluded += 1;
        }
    }

    debug!(
        %old_date,
        %new_date,
        old = old.len(),
        new = new.len(),
        excluded,
        "partitioned listings into snapshots"
    );

    Ok(Snapshots {
        old_date,
        new_date,
        old,
        new,
        excluded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::listing::Listing;

    fn priced(id: &str, date: (i32, u32, u32)) -> PricedListing {
        PricedListing {
            listing: Listing {
                id: id.to_string(),
                neighborhood: "Midtown".to_string(),
                price: 600_000.0,
                area: 950.0,
                lat: 40.7549,
                lon: -73.9840,
                observed_at: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            },
            price_per_area: 600_000.0 / 950.0,
        }
    }

    fn ids(listings: &[PricedListing]) -> Vec<&str> {
        listings.iter().map(|l| l.listing.id.as_str()).collect()
    }

    #[test]
    fn test_partition_by_global_extremes() {
        let snapshots = partition(vec![
            priced("1", (2023, 10, 1)),
            priced("2", (2023, 10, 15)),
            priced("3", (2023, 10, 31)),
            priced("4", (2023, 10, 1)),
        ])
        .unwrap();

        assert_eq!(snapshots.old_date, NaiveDate::from_ymd_opt(2023, 10, 1).unwrap());
        assert_eq!(snapshots.new_date, NaiveDate::from_ymd_opt(2023, 10, 31).unwrap());
        assert_eq!(ids(&snapshots.old), vec!["1", "4"]);
        assert_eq!(ids(&snapshots.new), vec!["3"]);
        assert_eq!(snapshots.excluded, 1);
    }

    #[test]
    fn test_single_date_yields_identical_snapshots() {
        let snapshots =
            partition(vec![priced("1", (2023, 10, 1)), priced("2", (2023, 10, 1))]).unwrap();

        assert_eq!(snapshots.old_date, snapshots.new_date);
        assert_eq!(snapshots.old, snapshots.new);
        assert_eq!(snapshots.excluded, 0);
    }

    #[test]
    fn test_empty_input_fails() {
        assert!(matches!(
            partition(Vec::new()),
            Err(AnalyzerError::EmptyDataset(_))
        ));
    }
}
