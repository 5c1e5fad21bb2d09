//! 物件リストのデータモデルと正規化処理を担当するモジュール
//!
//! 取り込まれた各物件に対して、比較の基準となる
//! 単位面積あたりの価格（`price / area`）を計算します。

use super::error::AnalyzerError;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

/// 取り込まれた物件リスト1件を表す構造体
///
/// # フィールド
///
/// - `id`: 物件の識別子（入力の表記をそのまま保持）
/// - `neighborhood`: 地区名（完全一致でグループ化される）
/// - `price`: 価格
/// - `area`: 面積（入力では`sqft`も受け付ける）
/// - `lat`, `lon`: 座標（出力行へそのまま引き継ぐ）
/// - `observed_at`: 観測日（入力では`date`も受け付ける）
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Listing {
    pub id: String,
    pub neighborhood: String,
    pub price: f64,
    #[serde(alias = "sqft")]
    pub area: f64,
    pub lat: f64,
    pub lon: f64,
    #[serde(alias = "date")]
    pub observed_at: NaiveDate,
}

impl Listing {
    /// 値が分析可能な範囲にあるかを検証します
    ///
    /// 面積0は不正とせず、`normalize`の`ZeroAreaPolicy`に委ねます。
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        let problem = if self.neighborhood.is_empty() {
            "neighborhood is empty"
        } else if !self.price.is_finite() || self.price <= 0.0 {
            "price must be a positive number"
        } else if !self.area.is_finite() || self.area < 0.0 {
            "area must be a non-negative number"
        } else if !self.lat.is_finite() || !self.lon.is_finite() {
            "coordinates must be finite"
        } else {
            return Ok(());
        };

        Err(AnalyzerError::InvalidListing(format!(
            "listing {}: {}",
            self.id, problem
        )))
    }
}

/// 単位面積あたりの価格を付与した物件
#[derive(Debug, Clone, PartialEq)]
pub struct PricedListing {
    pub listing: Listing,
    pub price_per_area: f64,
}

/// 面積が0の物件をどう扱うか
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroAreaPolicy {
    /// バッチ全体をエラーとして中断する
    #[default]
    Reject,
    /// 該当物件を除外して処理を続行する
    Skip,
}

/// 正規化の結果
///
/// `skipped`には`ZeroAreaPolicy::Skip`で除外された物件のIDが入ります。
#[derive(Debug, Default)]
pub struct Normalized {
    pub listings: Vec<PricedListing>,
    pub skipped: Vec<String>,
}

/// すべての物件に単位面積あたりの価格を付与します
///
/// # エラー
///
/// 以下の場合にエラーを返します：
/// - 値が不正な物件がある（`AnalyzerError::InvalidListing`）
/// - `policy`が`Reject`で、面積が0の物件がある（`AnalyzerError::DivisionByZero`）
pub fn normalize(
    listings: Vec<Listing>,
    policy: ZeroAreaPolicy,
) -> Result<Normalized, AnalyzerError> {
    let mut normalized = Normalized {
        listings: Vec::with_capacity(listings.len()),
        skipped: Vec::new(),
    };

    for listing in listings {
        listing.validate()?;

        if listing.area == 0.0 {
            match policy {
                ZeroAreaPolicy::Reject => {
                    return Err(AnalyzerError::DivisionByZero(format!(
                        "listing {} has zero area",
                        listing.id
                    )));
                }
                ZeroAreaPolicy::Skip => {
                    warn!(id = %listing.id, "skipping listing with zero area");
                    normalized.skipped.push(listing.id);
                    continue;
                }
            }
        }

        let price_per_area = listing.price / listing.area;
        normalized.listings.push(PricedListing {
            listing,
            price_per_area,
        });
    }

    Ok(normalized)
}
