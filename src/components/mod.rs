mod door_view;
mod fancy_pants_guy;
mod floor_picker;
mod hotel_facade;
mod lift_shaft;
mod term_selector;

pub use door_view::DoorView;
pub use fancy_pants_guy::FancyPantsGuy;
pub use floor_picker::FloorPicker;
pub use hotel_facade::HotelFacade;
pub use lift_shaft::LiftShaft;
pub use term_selector::TermSelector;
