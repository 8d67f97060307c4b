mod customer;

pub use customer::{
    CreateCustomerRequest, Customer, CustomerDetailResponse, CustomerResponse,
    UpdateCustomerRequest,
};
