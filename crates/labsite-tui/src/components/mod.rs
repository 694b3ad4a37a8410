pub mod chip_bar;
pub mod entry_detail;
pub mod help_overlay;
pub mod log_panel;
pub mod media_list;
pub mod news_panel;
pub mod pager;

#[cfg(test)]
pub(crate) mod test_support;
