//! 不動産物件リストのホットスポット分析ツール
//!
//! このクレートは、観測日付きの物件リストを分析し、
//! データセットの最古日から最新日にかけて単位面積あたりの価格が
//! 最も上昇した地区（ホットスポット）を特定するための機能を提供します。
//!
//! # 主な機能
//!
//! - 物件ごとの単位面積あたり価格の計算
//! - 最古日・最新日によるスナップショット分割
//! - 地区ごとの平均単価と成長率の算出
//! - 描画用の出力行の組み立てとホットスポットの選択
//!
//! # 使用例
//!
//! ```no_run
//! use market_hotspot::{ListingSource, MarketAnalyzer};
//!
//! let source = ListingSource::open("listings.csv", vec![], vec![]).unwrap();
//! let report = MarketAnalyzer::default()
//!     .analyze(source.listings().unwrap())
//!     .unwrap();
//!
//! println!("{}: {:.2}%", report.hotspot.neighborhood, report.hotspot.growth_pct);
//! ```

pub mod analyzer;
pub use analyzer::{AnalyzerError, ListingSource, MarketAnalyzer, MarketReport, ZeroAreaPolicy};
