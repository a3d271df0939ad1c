use serde_json::{Value, json};

/// Two flat dish records.
pub fn dishes() -> Value {
    json!({"dishes": [
        {"id": "1", "name": "Taco", "price": 3.5},
        {"id": "2", "name": "Soda", "price": 1.0}
    ]})
}

/// `count` records with six columns; `id` runs from 0.
pub fn numbered_rows(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                json!({
                    "id": i,
                    "nombre": format!("Plato {}", i),
                    "precio": i as f64 * 0.5,
                    "disponible": i % 3 != 0,
                    "categoria": {"id": i % 4, "nombre": "Principal"},
                    "etiquetas": [{"id": 1, "role": "chef"}]
                })
            })
            .collect(),
    )
}

/// The shape the restaurant query layer returns: several tables of mixed shapes.
pub fn restaurant() -> Value {
    json!({
        "platos": [
            {"id": 1, "nombre": "Paella", "precio": 12.0, "categoria": {"id": 2, "nombre": "Arroces"}},
            {"id": 2, "nombre": "Gazpacho", "precio": 6.5, "vegano": true}
        ],
        "restaurante": {"id": 9, "nombre": "Casa Pepe", "abierto": false},
        "mesas": [],
        "total": 42,
        "meseros": [{"id": 3, "turnos": ["mañana", "tarde"]}, "sin asignar"]
    })
}
