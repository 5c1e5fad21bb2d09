//! 分析結果の表現と出力行の組み立てを担当するモジュール
//!
//! 地区ごとの成長率レコード、描画側へ渡す出力行、
//! そしてホットスポット（成長率が最大の地区）の選択を提供します。

use super::error::AnalyzerError;
use super::listing::PricedListing;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 地区ごとの成長率を保持する構造体
///
/// # フィールド
///
/// - `neighborhood`: 地区名
/// - `old_price_per_area`: 最古日の平均単価
/// - `new_price_per_area`: 最新日の平均単価
/// - `growth_pct`: 成長率（%）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRecord {
    pub neighborhood: String,
    #[serde(serialize_with = "round_to_3", deserialize_with = "deserialize_f64")]
    pub old_price_per_area: f64,
    #[serde(serialize_with = "round_to_3", deserialize_with = "deserialize_f64")]
    pub new_price_per_area: f64,
    #[serde(serialize_with = "round_to_3", deserialize_with = "deserialize_f64")]
    pub growth_pct: f64,
}

/// 最新日に観測された物件1件分の出力行
///
/// 物件の全フィールドに、単価と所属地区の成長率を加えたものです。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    pub id: String,
    pub neighborhood: String,
    pub price: f64,
    pub area: f64,
    pub lat: f64,
    pub lon: f64,
    pub observed_at: NaiveDate,
    #[serde(serialize_with = "round_to_3", deserialize_with = "deserialize_f64")]
    pub price_per_area: f64,
    #[serde(serialize_with = "round_to_3", deserialize_with = "deserialize_f64")]
    pub growth_pct: f64,
}

impl OutputRow {
    fn new(priced: PricedListing, growth_pct: f64) -> Self {
        let listing = priced.listing;
        Self {
            id: listing.id,
            neighborhood: listing.neighborhood,
            price: listing.price,
            area: listing.area,
            lat: listing.lat,
            lon: listing.lon,
            observed_at: listing.observed_at,
            price_per_area: priced.price_per_area,
            growth_pct,
        }
    }
}

/// 最新スナップショットの物件に所属地区の成長率を付与します
///
/// 成長率レコードが存在しない地区の物件は出力から除外されます。
/// 出力は入力の順序を保ちます。
pub fn assemble(new_subset: Vec<PricedListing>, records: &[GrowthRecord]) -> Vec<OutputRow> {
    let growth_by_neighborhood: HashMap<&str, f64> = records
        .iter()
        .map(|r| (r.neighborhood.as_str(), r.growth_pct))
        .collect();

    new_subset
        .into_iter()
        .filter_map(|priced| {
            let growth_pct = *growth_by_neighborhood.get(priced.listing.neighborhood.as_str())?;
            Some(OutputRow::new(priced, growth_pct))
        })
        .collect()
}

/// 成長率が最大の地区（ホットスポット）を選択します
///
/// 同率の場合は先に現れたレコードが選ばれます。
///
/// # エラー
///
/// レコードが空の場合に`AnalyzerError::EmptyDataset`を返します。
pub fn select_hotspot(records: &[GrowthRecord]) -> Result<&GrowthRecord, AnalyzerError> {
    let mut iter = records.iter();
    let first = iter.next().ok_or_else(|| {
        AnalyzerError::EmptyDataset("no neighborhood appears in both snapshots".to_string())
    })?;

    Ok(iter.fold(first, |best, record| {
        if record.growth_pct > best.growth_pct {
            record
        } else {
            best
        }
    }))
}

/// 浮動小数点数を3桁に丸める補助関数
fn round_to_3<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64((*value * 1000.0).round() / 1000.0)
}

fn deserialize_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    f64::deserialize(deserializer)
}
