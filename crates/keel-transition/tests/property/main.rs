mod transition_properties;
