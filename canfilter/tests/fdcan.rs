use canfilter::{FdCan128, FdCan28, FilterBuilder, FilterError};

fn word(image: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        image[offset],
        image[offset + 1],
        image[offset + 2],
        image[offset + 3],
    ])
}

fn std_word(image: &[u8], i: usize) -> u32 {
    word(image, 4 + 4 * i)
}

fn ext_words(image: &[u8], std_capacity: usize, i: usize) -> (u32, u32) {
    let offset = 4 + 4 * std_capacity + 8 * i;
    (word(image, offset), word(image, offset + 4))
}

#[test]
fn dual_id_element() -> anyhow::Result<()> {
    let mut f = FdCan28::new();
    f.begin();
    f.parse("0x100 0x200")?;
    f.end()?;

    let image = f.image();
    assert_eq!(image.len(), 4 + 4 * 28 + 8 * 8);
    assert_eq!(image[0], 3);
    assert_eq!(image[1], 1); // std_filter_nbr
    assert_eq!(image[2], 0); // ext_filter_nbr
    assert_eq!(image[3], 0);
    // dual, FIFO 0, SFID1=0x100, SFID2=0x200
    assert_eq!(std_word(&image, 0), (1 << 30) | (1 << 27) | (0x100 << 16) | 0x200);
    // header plus the element word, little-endian on the wire
    assert_eq!(hex::encode(&image[..8]), "0301000000020049");
    Ok(())
}

#[test]
fn ext_range_element() -> anyhow::Result<()> {
    let mut f = FdCan128::new();
    f.begin();
    f.parse("0x1FFF0000-0x1FFFFFFF")?;
    f.end()?;

    let image = f.image();
    assert_eq!(image.len(), 4 + 4 * 128 + 8 * 64);
    assert_eq!(image[0], 4);
    assert_eq!(image[1], 0);
    assert_eq!(image[2], 1);

    let (f0, f1) = ext_words(&image, 128, 0);
    assert_eq!(f0, (1 << 29) | 0x1FFF0000);
    assert_eq!(f0, 0x3FFF_0000);
    assert_eq!(f1, 0x1FFF_FFFF); // filter type range = 0
    Ok(())
}

#[test]
fn singleton_id_flushes_as_benign_dual() -> anyhow::Result<()> {
    let mut f = FdCan28::new();
    f.begin();
    f.parse("0x123")?;
    f.end()?;

    let image = f.image();
    assert_eq!(image[1], 1);
    assert_eq!(std_word(&image, 0), (1 << 30) | (1 << 27) | (0x123 << 16) | 0x123);
    Ok(())
}

#[test]
fn std_range_element() -> anyhow::Result<()> {
    let mut f = FdCan28::new();
    f.begin();
    f.parse("0x200-0x2FF")?;
    f.end()?;

    let image = f.image();
    // range type (0), FIFO 0
    assert_eq!(std_word(&image, 0), (1 << 27) | (0x200 << 16) | 0x2FF);
    assert!(f.dump_filters().contains("sf[0]: range 0x200 0x2ff fifo0"));
    Ok(())
}

#[test]
fn unordered_range_is_normalized() -> anyhow::Result<()> {
    let mut f = FdCan128::new();
    f.begin();
    f.add_ext_range(0x1FFFFFFF, 0x1FFF0000)?;
    f.end()?;

    let (f0, f1) = ext_words(&f.image(), 128, 0);
    assert_eq!(f0, (1 << 29) | 0x1FFF0000);
    assert_eq!(f1, 0x1FFF_FFFF);
    Ok(())
}

#[test]
fn elements_fill_in_directive_order() -> anyhow::Result<()> {
    let mut f = FdCan28::new();
    f.begin();
    f.parse("0x100-0x1FF, 0x300, 0x400, 0x500-0x5FF")?;
    f.end()?;

    let image = f.image();
    assert_eq!(image[1], 3);
    assert_eq!(std_word(&image, 0), (1 << 27) | (0x100 << 16) | 0x1FF);
    assert_eq!(std_word(&image, 1), (1 << 30) | (1 << 27) | (0x300 << 16) | 0x400);
    assert_eq!(std_word(&image, 2), (1 << 27) | (0x500 << 16) | 0x5FF);
    Ok(())
}

#[test]
fn ext_table_capacity() -> anyhow::Result<()> {
    let mut f = FdCan28::new();
    f.begin();
    for k in 0..8u32 {
        f.add_ext_range(k * 0x1000, k * 0x1000 + 0xFFF)?;
    }
    assert_eq!(f.add_ext_range(0x9000, 0x9FFF), Err(FilterError::Full));
    f.end()?;

    let image = f.image();
    assert_eq!(image[2], 8);
    Ok(())
}

#[test]
fn std_table_capacity() -> anyhow::Result<()> {
    let mut f = FdCan28::new();
    f.begin();
    for k in 0..28u32 {
        f.add_std_range(k, k + 1)?;
    }
    assert_eq!(f.add_std_range(100, 101), Err(FilterError::Full));
    f.end()?;

    let image = f.image();
    assert_eq!(image[1], 28);
    // extended table untouched
    assert_eq!(image[2], 0);
    for i in 0..8 {
        assert_eq!(ext_words(&image, 28, i), (0, 0));
    }
    Ok(())
}

#[test]
fn entries_beyond_counts_stay_zero() -> anyhow::Result<()> {
    let mut f = FdCan28::new();
    f.begin();
    f.parse("0x100-0x1FF")?;
    f.end()?;

    let image = f.image();
    assert_eq!(image[1], 1);
    for i in 1..28 {
        assert_eq!(std_word(&image, i), 0);
    }
    Ok(())
}

#[test]
fn param_on_oversized_arguments() {
    let mut f = FdCan28::new();
    f.begin();
    assert_eq!(f.add_std_id(0x800), Err(FilterError::Param));
    assert_eq!(f.add_std_range(0, 0x800), Err(FilterError::Param));
    assert_eq!(f.add_ext_id(0x2000_0000), Err(FilterError::Param));
    assert_eq!(f.add_ext_range(0x2000_0000, 0), Err(FilterError::Param));
}

#[test]
fn allow_all_is_one_element_per_table() -> anyhow::Result<()> {
    let mut f = FdCan28::new();
    f.begin();
    f.allow_all()?;
    f.end()?;

    let image = f.image();
    assert_eq!(image[1], 1);
    assert_eq!(image[2], 1);
    assert_eq!(std_word(&image, 0), (1 << 27) | 0x7FF);
    let (f0, f1) = ext_words(&image, 28, 0);
    assert_eq!(f0, 1 << 29);
    assert_eq!(f1, 0x1FFF_FFFF);
    Ok(())
}

#[test]
fn usage_reports_both_tables() -> anyhow::Result<()> {
    let mut f = FdCan28::new();
    f.begin();
    f.parse("0x100-0x1FF")?;
    f.end()?;
    assert_eq!(f.usage(), "filter usage: 1/28 standard (4%), 0/8 extended (0%)");

    let mut f = FdCan128::new();
    f.begin();
    f.parse("0x1FFF0000-0x1FFFFFFF")?;
    f.end()?;
    assert_eq!(f.usage(), "filter usage: 0/128 standard (0%), 1/64 extended (2%)");
    Ok(())
}

#[test]
fn begin_discards_previous_state() -> anyhow::Result<()> {
    let mut f = FdCan128::new();
    f.begin();
    f.parse("0x100 0x200 0x300")?;
    f.end()?;
    assert_eq!(f.image()[1], 2);

    f.begin();
    f.end()?;
    let image = f.image();
    assert_eq!(image[0], 4);
    assert_eq!(image[1], 0);
    assert_eq!(image[2], 0);
    assert!(image[4..].iter().all(|&b| b == 0));
    Ok(())
}
