use criterion::{Criterion, black_box, criterion_group, criterion_main};
use query_values::record;
use std::collections::HashMap;

// Simple data structures for benchmarking
struct SimpleStruct {
    id: u32,
    name: String,
    active: bool,
}

record! {
    SimpleStruct {
        id,
        name,
        active => "active,int",
    }
}

struct SimpleWithOption {
    id: u32,
    name: String,
    email: Option<String>,
}

record! {
    SimpleWithOption {
        id,
        name,
        email => "email,omitempty",
    }
}

// Complex/nested data structures for benchmarking
struct Address {
    city: String,
    street: String,
    postcode: String,
}

record! {
    Address {
        city,
        street,
        postcode,
    }
}

struct QueryParams {
    id: u8,
    name: String,
    phone: u32,
    address: Address,
    user_ids: Vec<u8>,
}

record! {
    QueryParams {
        id,
        name,
        phone,
        address,
        user_ids => "user_ids,brackets",
    }
}

struct Level2 {
    value: String,
    flags: Vec<bool>,
    config: HashMap<String, i32>,
}

record! {
    Level2 {
        value,
        flags => "flags,int,comma",
        config,
    }
}

struct Level1 {
    level2: Level2,
    tags: Vec<String>,
}

record! {
    Level1 {
        level2,
        tags => "tags,numbered",
    }
}

struct DeepNested {
    level1: Level1,
    metadata: HashMap<String, String>,
}

record! {
    DeepNested {
        level1,
        metadata,
    }
}

fn encode_simple_struct(c: &mut Criterion) {
    let data = SimpleStruct {
        id: 42,
        name: "test_user".to_string(),
        active: true,
    };

    c.bench_function("encode_simple_struct", |b| {
        b.iter(|| query_values::to_values(black_box(&data)).unwrap())
    });
}

fn encode_simple_with_option(c: &mut Criterion) {
    let some = SimpleWithOption {
        id: 123,
        name: "user_with_email".to_string(),
        email: Some("user@example.com".to_string()),
    };
    let none = SimpleWithOption {
        id: 456,
        name: "user_without_email".to_string(),
        email: None,
    };

    c.bench_function("encode_simple_with_option_some", |b| {
        b.iter(|| query_values::to_values(black_box(&some)).unwrap())
    });
    c.bench_function("encode_simple_with_option_none", |b| {
        b.iter(|| query_values::to_values(black_box(&none)).unwrap())
    });
}

fn encode_nested_struct(c: &mut Criterion) {
    let data = QueryParams {
        id: 42,
        name: "Acme".to_string(),
        phone: 12345,
        address: Address {
            city: "Carrot City".to_string(),
            street: "Special-Street* No. 11".to_string(),
            postcode: "12345".to_string(),
        },
        user_ids: vec![1, 2, 3, 4],
    };

    c.bench_function("encode_nested_struct", |b| {
        b.iter(|| query_values::to_values(black_box(&data)).unwrap())
    });
    c.bench_function("to_string_nested_struct", |b| {
        b.iter(|| query_values::to_string(black_box(&data)).unwrap())
    });
}

fn encode_deep_nested(c: &mut Criterion) {
    let mut metadata = HashMap::new();
    metadata.insert("version".to_string(), "1.0".to_string());
    metadata.insert("author".to_string(), "test".to_string());

    let mut config = HashMap::new();
    config.insert("max_retry".to_string(), 3);
    config.insert("timeout".to_string(), 30);

    let data = DeepNested {
        level1: Level1 {
            level2: Level2 {
                value: "deep_value".to_string(),
                flags: vec![true, false, true],
                config,
            },
            tags: vec!["tag1".to_string(), "tag2".to_string(), "tag3".to_string()],
        },
        metadata,
    };

    c.bench_function("encode_deep_nested", |b| {
        b.iter(|| query_values::to_values(black_box(&data)).unwrap())
    });
}

criterion_group!(
    encode_simple,
    encode_simple_struct,
    encode_simple_with_option
);

criterion_group!(encode_complex, encode_nested_struct, encode_deep_nested);

criterion_main!(encode_simple, encode_complex);
