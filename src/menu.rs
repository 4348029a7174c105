//! The fixed menu and random dish selection.

use rand::Rng;

pub type MenuItem = &'static str;

pub const MENU: [MenuItem; 10] = [
    "BensChilli",
    "BensHalfSmoke",
    "BensHotDog",
    "BensChilliCheeseFries",
    "BensShake",
    "BensHotCakes",
    "BensCake",
    "BensHamburger",
    "BensVeggieBurger",
    "BensOnionRings",
];

/// Pick one menu item uniformly at random.
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> MenuItem {
    MENU[rng.random_range(0..MENU.len())]
}
