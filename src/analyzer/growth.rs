//! 地区ごとの価格成長率の集計を担当するモジュール
//!
//! 集計は以下の流れで行われます：
//!
//! 1. 各スナップショットの物件を地区名でグループ化
//! 2. グループごとに単位面積あたり価格の単純平均を計算
//! 3. 旧・新両方に存在する地区のみを結合（内部結合）
//! 4. 成長率 `(new - old) / old * 100` を算出

use super::error::AnalyzerError;
use super::listing::PricedListing;
use super::metrics::GrowthRecord;
use super::snapshot::Snapshots;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// あるスナップショットにおける地区ごとの平均価格
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborhoodMetric {
    pub neighborhood: String,
    pub mean_price_per_area: f64,
    pub snapshot_date: NaiveDate,
}

/// 集計結果
///
/// # フィールド
///
/// - `records`: 地区名の昇順に並んだ成長率レコード
/// - `dropped`: 片方のスナップショットにしか存在せず除外された地区名
#[derive(Debug, Default)]
pub struct GrowthTable {
    pub records: Vec<GrowthRecord>,
    pub dropped: Vec<String>,
}

/// 地区ごとの統計情報を収集する内部構造体
///
/// # フィールド
///
/// - `total_price_per_area`: 単価の合計
/// - `listings`: 物件数
#[derive(Default)]
struct NeighborhoodStats {
    total_price_per_area: f64,
    listings: u32,
}

impl NeighborhoodStats {
    fn into_metric(self, neighborhood: String, snapshot_date: NaiveDate) -> NeighborhoodMetric {
        let mean_price_per_area = self.total_price_per_area / f64::from(self.listings);

        NeighborhoodMetric {
            neighborhood,
            mean_price_per_area,
            snapshot_date,
        }
    }
}

/// スナップショット内の物件を地区ごとに平均します
///
/// 戻り値は地区名の昇順に並びます。地区名は完全一致で比較され、
/// 大文字小文字や空白の正規化は行いません。
pub fn snapshot_metrics(
    subset: &[PricedListing],
    snapshot_date: NaiveDate,
) -> Vec<NeighborhoodMetric> {
    let mut groups: BTreeMap<String, NeighborhoodStats> = BTreeMap::new();

    for priced in subset {
        let stats = groups
            .entry(priced.listing.neighborhood.clone())
            .or_default();

        stats.total_price_per_area += priced.price_per_area;
        stats.listings += 1;
    }

    groups
        .into_iter()
        .map(|(neighborhood, stats)| stats.into_metric(neighborhood, snapshot_date))
        .collect()
}

/// 旧・新スナップショットの地区別平均を結合し、成長率を計算します
///
/// # エラー
///
/// 結合後の地区の旧平均価格が0の場合に`AnalyzerError::DivisionByZero`を返します。
pub fn aggregate(snapshots: &Snapshots) -> Result<GrowthTable, AnalyzerError> {
    let old_metrics: BTreeMap<String, f64> = snapshot_metrics(&snapshots.old, snapshots.old_date)
        .into_iter()
        .map(|m| (m.neighborhood, m.mean_price_per_area))
        .collect();
    let mut new_metrics: BTreeMap<String, f64> =
        snapshot_metrics(&snapshots.new, snapshots.new_date)
            .into_iter()
            .map(|m| (m.neighborhood, m.mean_price_per_area))
            .collect();

    let mut table = GrowthTable::default();

    for (neighborhood, old) in old_metrics {
        let Some(new) = new_metrics.remove(&neighborhood) else {
            debug!(%neighborhood, "neighborhood missing from latest snapshot");
            table.dropped.push(neighborhood);
            continue;
        };

        if old == 0.0 {
            return Err(AnalyzerError::DivisionByZero(format!(
                "neighborhood {} has zero mean price per area on {}",
                neighborhood, snapshots.old_date
            )));
        }

        table.records.push(GrowthRecord {
            growth_pct: (new - old) / old * 100.0,
            neighborhood,
            old_price_per_area: old,
            new_price_per_area: new,
        });
    }

    for neighborhood in new_metrics.into_keys() {
        debug!(%neighborhood, "neighborhood missing from earliest snapshot");
        table.dropped.push(neighborhood);
    }
    table.dropped.sort();

    Ok(table)
}
