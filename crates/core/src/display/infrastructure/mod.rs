pub mod highgui_display;
