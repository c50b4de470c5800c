// Diesel table definitions for the marketplace database.

diesel::table! {
    stores (store_id) {
        store_id -> Integer,
        store_name -> Text,
        address -> Text,
        contact_number -> Text,
        latitude -> Nullable<Double>,
        longitude -> Nullable<Double>,
        maps_url -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::table! {
    products (product_id) {
        product_id -> Integer,
        store_id -> Integer,
        product_name -> Text,
        description -> Text,
        price -> Double,
        stock_quantity -> Integer,
        category -> Text,
        image_url -> Text,
        created_at -> Text,
    }
}

diesel::joinable!(products -> stores (store_id));
diesel::allow_tables_to_appear_in_same_query!(products, stores);
