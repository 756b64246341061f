pub mod help_bar;
pub mod recent_list;
pub mod search_bar;
pub mod unit_selector;
pub mod weather_panel;

pub use help_bar::{HelpBar, HelpBarProps};
pub use recent_list::{RecentList, RecentListProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use unit_selector::{UnitSelector, UnitSelectorProps};
pub use weather_panel::{WeatherPanel, WeatherPanelProps, ERROR_ICON, SPINNERS};
