//! Names of the persisted slots. These are the on-disk format; renaming one
//! orphans whatever was stored under the old name.

pub const CART: &str = "cart";
pub const WISHLIST: &str = "wishlist";
pub const USER_BIDS: &str = "userBids";
pub const USER_ALBUMS: &str = "userAlbums";
pub const USER_COLLECTION: &str = "userCollection";
pub const ALBUM_DRAFT: &str = "albumDraft";
pub const NOTIFICATIONS: &str = "notifications";
pub const USER_PROFILE: &str = "userProfile";
pub const HAS_SEEN_ONBOARDING: &str = "hasSeenOnboarding";

pub const ALL: [&str; 9] = [
    CART,
    WISHLIST,
    USER_BIDS,
    USER_ALBUMS,
    USER_COLLECTION,
    ALBUM_DRAFT,
    NOTIFICATIONS,
    USER_PROFILE,
    HAS_SEEN_ONBOARDING,
];
