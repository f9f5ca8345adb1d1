use bucket::{
    models::{BucketOptions, ContactClick, ProductView, Transaction},
    Client,
};

#[tokio::main]
async fn main() {
    let client = Client::new(
        "exp_price_001".to_string(),
        "visitor_demo".to_string(),
        BucketOptions::default(),
    );

    println!("group: {:?}", client.get_group().await);
    println!("group config: {:?}", client.get_group_config().await);

    let view = ProductView {
        product_id: "p1".to_string(),
        product_price: 1099.0,
        market_price: 1299.0,
        product_model: "phone-13".to_string(),
        condition: "used".to_string(),
    };
    println!("view ack: {:?}", client.report_view(&view).await);

    let click = ContactClick {
        product_id: "p1".to_string(),
        product_price: 1099.0,
    };
    println!("click ack: {:?}", client.report_click(&click).await);

    let transaction = Transaction {
        transaction_id: "tx_1".to_string(),
        product_id: "p1".to_string(),
        transaction_price: 1050.0,
        list_price: 1099.0,
        market_price: 1299.0,
    };
    println!(
        "transaction ack: {:?}",
        client.report_transaction(&transaction).await
    );
}
