use cratedigger_core::{BidStatus, Condition, MediaFormat, NotificationKind, WizardStep};
use cratedigger_engine::{EngineError, Feedback, FeedbackVariant, WishlistToggle, WizardMount};
use cratedigger_harness::{TestShop, album, auction_lot, init_test_logging, nevermind};

// ============================================================================
// Cart
// ============================================================================

#[test]
fn same_album_twice_makes_one_line() -> Result<(), Box<dyn std::error::Error>> {
    init_test_logging();
    let mut shop = TestShop::new()?;

    shop.market.add_to_cart(&nevermind())?;
    let added = shop.market.add_to_cart(&nevermind())?;

    assert_eq!(added.quantity, 2);
    assert_eq!(shop.market.cart_lines().len(), 1);
    assert_eq!(shop.market.cart_lines()[0].quantity, 2);
    assert_eq!(shop.market.total_price(), 50.0);
    assert_eq!(shop.market.total_items(), 2);
    Ok(())
}

#[test]
fn quantity_edits_and_removal() -> Result<(), Box<dyn std::error::Error>> {
    init_test_logging();
    let mut shop = TestShop::new()?;
    let ten = album("Ten", "Pearl Jam", 20.0);
    shop.market.add_to_cart(&nevermind())?;
    shop.market.add_to_cart(&ten)?;

    assert_eq!(shop.market.update_quantity(&ten.identity(), 4), Some(4));
    assert_eq!(shop.market.total_price(), 25.0 + 80.0);

    assert_eq!(shop.market.update_quantity(&ten.identity(), 0), None);
    assert_eq!(shop.market.cart_lines().len(), 1);

    shop.market.clear_cart();
    assert!(shop.market.cart_lines().is_empty());
    assert_eq!(shop.market.total_price(), 0.0);
    Ok(())
}

// ============================================================================
// Wishlist
// ============================================================================

#[test]
fn wishlist_toggle_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    init_test_logging();
    let mut shop = TestShop::new()?;
    let item = nevermind();

    assert_eq!(shop.market.toggle_wishlist(&item)?.toggle, WishlistToggle::Added);
    assert!(shop.market.is_wishlisted(&item.identity()));
    assert_eq!(shop.market.toggle_wishlist(&item)?.toggle, WishlistToggle::Removed);
    assert!(!shop.market.is_wishlisted(&item.identity()));
    assert_eq!(shop.market.wishlist_len(), 0);
    Ok(())
}

// ============================================================================
// Bids
// ============================================================================

#[test]
fn low_bid_rejected_then_higher_bid_accepted() -> Result<(), Box<dyn std::error::Error>> {
    init_test_logging();
    let mut shop = TestShop::new()?;

    // Publish a seller listing at 25 so the accepted bid has a price to move.
    {
        let wizard = shop.market.wizard_mut();
        let form = wizard.form_mut();
        form.title = "Nevermind".into();
        form.artist = "Nirvana".into();
        form.format = Some(MediaFormat::Vinyl);
        wizard.next()?;
        let form = wizard.form_mut();
        form.condition = Some(Condition::VeryGood);
        form.price = Some(25.0);
        wizard.next()?;
        wizard.next()?;
    }
    let listing_id = shop.market.publish_draft()?.id();
    let listing = shop.market.listing_ref(listing_id).ok_or("listing missing")?;

    let err = shop.market.place_bid(&listing, 20.0).unwrap_err();
    match &err {
        EngineError::BidTooLow { minimum, .. } => assert_eq!(*minimum, 26.0),
        other => panic!("expected BidTooLow, got {other:?}"),
    }
    let feedback = Feedback::from(&err);
    assert_eq!(feedback.variant, FeedbackVariant::Destructive);
    assert!(feedback.description.contains("26"));

    let placed = shop.market.place_bid(&listing, 30.0)?;
    assert!(placed.listing_updated);
    assert_eq!(shop.market.listing(listing_id).map(|l| l.price), Some(30.0));
    assert_eq!(shop.market.bids_for_listing(&listing.id).len(), 1);
    Ok(())
}

#[test]
fn bid_text_parsing_and_ceiling() -> Result<(), Box<dyn std::error::Error>> {
    init_test_logging();
    let mut shop = TestShop::new()?;
    let lot = auction_lot("Led Zeppelin IV", "Led Zeppelin", 65.0);

    assert!(matches!(
        shop.market.place_bid_text(&lot, "sixty"),
        Err(EngineError::InvalidBidFormat { .. })
    ));
    let err = shop.market.place_bid_text(&lot, "100000").unwrap_err();
    assert_eq!(Feedback::from(&err).description, "Maximum bid amount is $99999");

    let placed = shop.market.place_bid_text(&lot, "67")?;
    assert_eq!(placed.record.bid_amount, 67.0);
    assert!(!placed.listing_updated);
    assert_eq!(shop.market.active_bid_count(), 1);

    let notifications = shop.market.notifications();
    assert_eq!(notifications[0].kind, NotificationKind::Bid);
    assert_eq!(shop.market.unread_notification_count(), 1);

    shop.market.set_bid_status(placed.record.id, BidStatus::Lost)?;
    assert_eq!(shop.market.active_bid_count(), 0);
    Ok(())
}

// ============================================================================
// Wizard
// ============================================================================

#[test]
fn wizard_blocks_on_missing_details() -> Result<(), Box<dyn std::error::Error>> {
    init_test_logging();
    let mut shop = TestShop::new()?;
    let wizard = shop.market.wizard_mut();

    wizard.form_mut().title = "Abbey Road".into();
    wizard.form_mut().artist = "The Beatles".into();
    let err = wizard.next().unwrap_err();
    assert!(matches!(
        &err,
        EngineError::ValidationIncomplete { step: WizardStep::Details, missing } if missing == &vec!["format"]
    ));
    assert_eq!(wizard.step(), WizardStep::Details);

    wizard.form_mut().format = Some(MediaFormat::Cd);
    assert_eq!(wizard.next()?, WizardStep::ConditionPrice);
    Ok(())
}

#[test]
fn saved_draft_survives_reopen() -> Result<(), Box<dyn std::error::Error>> {
    init_test_logging();
    let mut shop = TestShop::new()?;
    {
        let wizard = shop.market.wizard_mut();
        wizard.form_mut().title = "Abbey Road".into();
        wizard.form_mut().artist = "The Beatles".into();
        wizard.form_mut().format = Some(MediaFormat::Vinyl);
        wizard.next()?;
    }
    let saved = shop.market.save_draft()?;

    shop.reopen()?;
    let mount = shop.market.mount_wizard();
    assert_eq!(
        mount,
        WizardMount::Restored {
            saved_at: saved.saved_at,
            step: WizardStep::ConditionPrice,
        }
    );
    assert_eq!(shop.market.wizard().step(), WizardStep::ConditionPrice);
    assert_eq!(shop.market.wizard().form().title, "Abbey Road");
    Ok(())
}

#[test]
fn publishing_lists_album_and_clears_draft() -> Result<(), Box<dyn std::error::Error>> {
    init_test_logging();
    let mut shop = TestShop::new()?;
    {
        let wizard = shop.market.wizard_mut();
        let form = wizard.form_mut();
        form.title = "Blue Train".into();
        form.artist = "John Coltrane".into();
        form.format = Some(MediaFormat::Vinyl);
        form.genre = "Jazz".into();
        wizard.next()?;
        let form = wizard.form_mut();
        form.condition = Some(Condition::Mint);
        form.price = Some(150.0);
        wizard.next()?;
        wizard.form_mut().description = "Blue Note reissue".into();
        wizard.next()?;
    }
    shop.market.save_draft()?;

    let published = shop.market.publish_draft()?;
    assert_eq!(shop.market.listings(), vec![published.listing.clone()]);
    assert_eq!(published.listing.genre, "Jazz");
    assert!(!shop.market.has_saved_draft());

    shop.reopen()?;
    assert_eq!(shop.market.mount_wizard(), WizardMount::Fresh);
    assert_eq!(shop.market.listings().len(), 1);
    Ok(())
}

// ============================================================================
// Checkout
// ============================================================================

#[test]
fn checkout_moves_cart_into_collection() -> Result<(), Box<dyn std::error::Error>> {
    init_test_logging();
    let mut shop = TestShop::new()?;
    assert!(matches!(shop.market.checkout(), Err(EngineError::EmptyCart)));

    shop.market.add_to_cart(&nevermind())?;
    shop.market.add_to_cart(&album("Bleach", "Nirvana", 18.0))?;
    let receipt = shop.market.checkout()?;
    assert_eq!(receipt.total_items, 2);
    assert_eq!(receipt.total_price, 43.0);
    assert!(Feedback::from(&receipt).is_success());

    shop.reopen()?;
    assert!(shop.market.cart_lines().is_empty());
    assert_eq!(shop.market.collection().len(), 2);
    Ok(())
}
