mod aggregate_properties;
