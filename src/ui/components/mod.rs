pub mod lesson_view;
pub mod menu;
pub mod progress_bar;
pub mod quiz_view;
pub mod verse_popup;
pub mod word_list;
