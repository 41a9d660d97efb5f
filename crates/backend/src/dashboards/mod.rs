pub mod d100_overview;
pub mod d101_entity_breakdown;
pub mod d102_client_pipeline;
pub mod d103_franchise_pipeline;
pub mod d104_sales_cycle;
pub mod d105_commission_detail;
pub mod d106_commission_overview;
pub mod navigation;
pub mod pipeline;
