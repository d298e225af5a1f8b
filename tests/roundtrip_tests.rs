//! Integration tests for write-then-read fidelity of the document format.

use brickstore_xml::{
    BrickStoreReader, BrickStoreWriter, Condition, Inventory, Item, ItemType, PriceTier, Status,
    SubCondition, TieredPrice, WriterOptions,
};
use rust_decimal_macros::dec;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

fn roundtrip(inventory: &Inventory) -> Inventory {
    let mut stream = Cursor::new(Vec::new());
    inventory.write_to(&mut stream).unwrap();
    Inventory::from_reader(stream).unwrap()
}

fn sample_inventory() -> Inventory {
    let mut brick = Item::new("3001", ItemType::Part);
    brick.color_id = Some(5);
    brick.name = "Brick 2 x 4".to_string();
    brick.color_name = Some("Red".to_string());
    brick.category_id = 5;
    brick.category_name = "Brick".to_string();
    brick.status = Status::Include;
    brick.quantity = Some(250);
    brick.price = Some(dec!(0.09));
    brick.condition = Condition::New;
    brick.remarks = Some("Drawer A4".to_string());
    brick.lot_id = Some(301122334);
    brick.owl_id = "531441".to_string();
    brick.owl_lot_id = Some(8812);
    brick.stockroom = Some("A".to_string());
    brick.tiered_price = Some(TieredPrice::new([
        PriceTier::new(100, dec!(0.085)),
        PriceTier::new(500, dec!(0.08)),
        PriceTier::new(1000, dec!(0.075)),
    ]));

    let mut set = Item::new("10179-1", ItemType::Set);
    set.name = "Millennium Falcon & Friends <UCS>".to_string();
    set.status = Status::Extra;
    set.quantity = Some(1);
    set.price = Some(dec!(3499));
    set.condition = Condition::Used;
    set.sub_condition = SubCondition::Incomplete;
    set.comments = Some("  Box has shelf wear  ".to_string());
    set.retain = true;
    set.bulk = 2;
    set.sale = 35;

    let mut gear = Item::new("852766", ItemType::Gear);
    gear.quantity = Some(0);
    gear.price = Some(dec!(-0.5));

    Inventory {
        items: vec![brick, set, gear, Item::new("bare", ItemType::Book)],
        currency: Some("USD".to_string()),
        changelog_id: Some(512006),
        comment: Some("weekly export".to_string()),
    }
}

#[test]
fn sample_inventory_survives_roundtrip() {
    let inventory = sample_inventory();
    assert_eq!(roundtrip(&inventory), inventory);
}

#[test]
fn every_known_item_type_survives_roundtrip() {
    let inventory = Inventory {
        items: ItemType::all()
            .iter()
            .map(|t| Item::new(format!("id-{t:?}"), *t))
            .collect(),
        ..Inventory::default()
    };

    assert_eq!(roundtrip(&inventory), inventory);
}

#[test]
fn every_status_and_condition_survives_roundtrip() {
    let mut items = Vec::new();
    for status in [Status::Unknown, Status::Include, Status::Exclude, Status::Extra] {
        for condition in [Condition::Unknown, Condition::New, Condition::Used] {
            for sub_condition in [
                SubCondition::Unknown,
                SubCondition::Complete,
                SubCondition::Incomplete,
                SubCondition::Sealed,
            ] {
                let mut item = Item::new("6020", ItemType::Set);
                item.status = status;
                item.condition = condition;
                item.sub_condition = sub_condition;
                items.push(item);
            }
        }
    }
    let inventory = Inventory {
        items,
        ..Inventory::default()
    };

    assert_eq!(roundtrip(&inventory), inventory);
}

#[test]
fn null_numbers_stay_null() {
    let inventory = Inventory {
        items: vec![Item::new("3001", ItemType::Part)],
        ..Inventory::default()
    };
    let item = &roundtrip(&inventory).items[0];

    assert_eq!(item.color_id, None);
    assert_eq!(item.quantity, None);
    assert_eq!(item.price, None);
    assert_eq!(item.lot_id, None);
    assert_eq!(item.owl_lot_id, None);
}

#[test]
fn compact_documents_read_back_identically() {
    let inventory = sample_inventory();
    let xml = BrickStoreWriter::new(WriterOptions::default().indent(0))
        .to_string(&inventory)
        .unwrap();

    let reread = BrickStoreReader::default().read_str(&xml).unwrap();
    assert_eq!(reread, inventory);
}

#[test]
fn windows_line_endings_survive_roundtrip() {
    let mut item = Item::new("3001", ItemType::Part);
    item.name = "Brick\r2 x 4".to_string();
    item.comments = Some("first\r\nsecond".to_string());
    item.remarks = Some("line1\r\nline2".to_string());
    let inventory = Inventory {
        items: vec![item],
        ..Inventory::default()
    };

    assert_eq!(roundtrip(&inventory), inventory);
}

#[test]
fn empty_tier_set_reads_back_as_none() {
    let mut item = Item::new("3001", ItemType::Part);
    item.tiered_price = Some(TieredPrice::default());
    let inventory = Inventory {
        items: vec![item],
        ..Inventory::default()
    };

    assert_eq!(roundtrip(&inventory).items[0].tiered_price, None);
}

#[test]
fn writer_leaves_cursor_for_embedding_container() {
    let mut stream = Cursor::new(Vec::new());
    stream.write_all(b"PREFIX:").unwrap();

    sample_inventory().write_to(&mut stream).unwrap();
    assert_eq!(stream.position(), 7);

    let mut embedded = String::new();
    stream.read_to_string(&mut embedded).unwrap();
    let reread = BrickStoreReader::default().read_str(&embedded).unwrap();
    assert_eq!(reread, sample_inventory());

    stream.seek(SeekFrom::Start(0)).unwrap();
    let mut prefix = [0u8; 7];
    stream.read_exact(&mut prefix).unwrap();
    assert_eq!(&prefix, b"PREFIX:");
}
