use tedac_nbt::{
    read_nbt_compressed,
    write_nbt,
    write_nbt_compressed,
    Compression,
    Encoding,
    NbtCompound,
    NbtDecoder,
    NbtList,
    NbtTag,
};

fn sample_state(name: &str, facing: &str) -> NbtCompound {
    let mut states = NbtCompound::new();
    states.insert_string("facing_direction".to_owned(), facing.to_owned());
    states.insert_bool("open_bit".to_owned(), true);
    states.insert_int("age".to_owned(), -3);

    let mut root = NbtCompound::new();
    root.insert_string("name".to_owned(), name.to_owned());
    root.insert_compound("states".to_owned(), states);
    root.insert_int("version".to_owned(), 18_090_528);
    root
}

#[test]
fn every_encoding_reads_back_what_it_wrote() {
    let mut root = sample_state("minecraft:wooden_door", "north");
    root.insert_long("seed".to_owned(), i64::MIN + 1);
    root.insert_list(
        "aliases".to_owned(),
        vec![NbtTag::from("door"), NbtTag::from("oak_door")].into_iter().collect::<NbtList>(),
    );
    root.insert("weights".to_owned(), vec![1_i32, -1, 1 << 20]);
    root.insert("raw".to_owned(), vec![-128_i8, 0, 127]);
    root.insert_list("nothing".to_owned(), NbtList::new());

    for encoding in [Encoding::NetworkLittleEndian, Encoding::LittleEndian, Encoding::BigEndian] {
        for compression in [Compression::None, Compression::Gzip, Compression::Zlib] {
            let mut bytes = Vec::new();
            write_nbt_compressed(&mut bytes, encoding, compression, "root", &root).unwrap();

            let (read, name) = read_nbt_compressed(&mut bytes.as_slice(), encoding, compression)
                .unwrap_or_else(|e| panic!("{:?}/{:?} failed to read: {}", encoding, compression, e));
            assert_eq!(name, "root");
            assert_eq!(read, root, "Mismatch for {:?}/{:?}", encoding, compression);
        }
    }
}

#[test]
fn decoder_streams_back_to_back_records() {
    let names = ["minecraft:air", "minecraft:stone", "minecraft:wooden_door"];

    let mut stream = Vec::new();
    for name in names {
        write_nbt(&mut stream, Encoding::NetworkLittleEndian, "", &sample_state(name, "east")).unwrap();
    }

    let decoded = NbtDecoder::new(stream.as_slice(), Encoding::NetworkLittleEndian)
        .map(|record| record.map(|(compound, _)| compound.get_string("name").unwrap().to_owned()))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(decoded, names);
}

#[test]
fn encodings_are_not_interchangeable() {
    let mut bytes = Vec::new();
    write_nbt(&mut bytes, Encoding::LittleEndian, "", &sample_state("minecraft:stone", "up")).unwrap();

    let mut decoder = NbtDecoder::new(bytes.as_slice(), Encoding::BigEndian);
    assert!(decoder.next_root().is_err(), "Big-endian reader accepted little-endian data.");
}

#[test]
fn compressed_streams_decode_record_by_record() {
    let names = ["minecraft:air", "minecraft:stone"];

    // One compressor around the whole stream
    for compression in [Compression::Gzip, Compression::Zlib] {
        let mut stream = Vec::new();
        {
            let mut writer = compression.writer(&mut stream);
            for name in names {
                write_nbt(&mut writer, Encoding::NetworkLittleEndian, "", &sample_state(name, "up")).unwrap();
            }
        }

        let decoder = NbtDecoder::new(compression.reader(stream.as_slice()), Encoding::NetworkLittleEndian);
        assert_eq!(decoder.map(Result::unwrap).count(), names.len(), "{:?}", compression);
    }

    // One gzip member per record
    let mut stream = Vec::new();
    for name in names {
        write_nbt_compressed(
            &mut stream,
            Encoding::NetworkLittleEndian,
            Compression::Gzip,
            "",
            &sample_state(name, "up"),
        )
        .unwrap();
    }

    let mut decoder = NbtDecoder::new(Compression::Gzip.reader(stream.as_slice()), Encoding::NetworkLittleEndian);
    for name in names {
        let (compound, _) = decoder.next_root().unwrap().unwrap();
        assert_eq!(compound.get_string("name"), Some(name));
    }
    assert!(decoder.next_root().unwrap().is_none());
}
