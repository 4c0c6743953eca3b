use tui_textarea::Input;
use tui_textarea::Key;

use super::map_input;
use crate::domain::models::Event;

fn input(key: Key, ctrl: bool) -> Input {
    return Input {
        key,
        ctrl,
        alt: false,
    };
}

#[test]
fn it_maps_scroll_keys() {
    assert!(matches!(map_input(input(Key::Up, false)), Event::UIScrollUp()));
    assert!(matches!(
        map_input(input(Key::Down, false)),
        Event::UIScrollDown()
    ));
    assert!(matches!(
        map_input(input(Key::Char('u'), true)),
        Event::UIScrollPageUp()
    ));
    assert!(matches!(
        map_input(input(Key::PageDown, false)),
        Event::UIScrollPageDown()
    ));
}

#[test]
fn it_maps_control_keys() {
    assert!(matches!(
        map_input(input(Key::Char('c'), true)),
        Event::KeyboardCTRLC()
    ));
    assert!(matches!(
        map_input(input(Key::Enter, false)),
        Event::KeyboardEnter()
    ));
}

#[test]
fn it_passes_other_keys_through() {
    for key in [Key::Char('c'), Key::Esc, Key::Tab, Key::Left, Key::Backspace] {
        let expected = format!("{key:?}");
        match map_input(input(key, false)) {
            Event::KeyboardCharInput(res) => assert_eq!(format!("{:?}", res.key), expected),
            _ => panic!("Wrong event for {expected}"),
        }
    }
}
